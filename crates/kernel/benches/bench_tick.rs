use std::hint::black_box;
use std::time::Instant;

use lifegrid_kernel::Universe;

fn make_universe(side: u32) -> Universe {
    let mut u = Universe::new(side, side).unwrap();
    u.reseed(42);
    u.randomize();
    u
}

fn bench_tick(side: u32, iterations: usize) {
    let mut u = make_universe(side);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(&mut u).tick();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  tick ({side}x{side}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_randomize(side: u32, iterations: usize) {
    let mut u = make_universe(side);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(&mut u).randomize();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  randomize ({side}x{side}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_toggle(side: u32, iterations: usize) {
    let mut u = make_universe(side);

    let start = Instant::now();
    for i in 0..iterations as i64 {
        black_box(&mut u).toggle_cell(i * 7, -i * 3);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  toggle ({side}x{side}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Universe Benchmarks ===\n");

    println!("Tick:");
    bench_tick(64, 1000);
    bench_tick(256, 100);
    bench_tick(1024, 10);

    println!("\nRandomize:");
    bench_randomize(64, 1000);
    bench_randomize(1024, 10);

    println!("\nToggle (wrapped coordinates):");
    bench_toggle(256, 100_000);

    println!("\n=== Done ===");
}
