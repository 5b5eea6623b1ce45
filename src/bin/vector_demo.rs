// Walks the vector through construction, enumerate, push and filter.
// Run with RUST_LOG=trace to watch the buffer reallocate.
use vector::{Result, Vector};

fn print(v: &mut Vector<i32>) {
    v.enumerate(|index, value| println!("{}: {}", index, value));
}

fn run() -> Result<()> {
    let mut v = Vector::from_slice(&[0i32; 20])?;
    v.enumerate(|index, value| *value = index as i32);

    v.push(15)?;

    println!("\nENUMERATE:");
    print(&mut v);

    // Drop every 15 and the element at index 10
    v.filter(|index, value| !(*value == 15 || index == 10));

    println!("\nFILTER & ENUMERATE:");
    print(&mut v);

    println!(
        "\nlength: {}, capacity: {}, reserved bytes: {}",
        v.len(),
        v.capacity(),
        v.size()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
