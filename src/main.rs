fn main() -> Result<(), eframe::Error> {
    // RUST_LOG=node_canvas=debug shows canvas events
    env_logger::init();

    node_canvas::run_app()
}
