fn main() {
    if let Err(err) = shadow_cubes::run() {
        eprintln!("Application error: {err}");
    }
}
