use std::{hint::black_box, time::Instant};

use zk_primitives::{hash2, Element};

const ITERS: usize = 100_000;

fn main() {
    let mut element = Element::new(5);

    let start = Instant::now();

    for _ in 0..ITERS {
        let new = hash2(element, black_box(Element::new(3)));
        element = black_box(new);
    }

    let time = start.elapsed();

    println!("{ITERS} poseidon hashes took {time:?}");
}
