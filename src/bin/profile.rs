use mazecarve::{
    app::{App, ImmediateClock},
    generators::{RngSource, get_rng},
    logging,
    window::HeadlessWindow,
};

/// Headless run: `profile [cols] [rows] [seed]`.
/// Drives the frame loop without rendering or pacing until the maze is finished.
fn main() -> std::io::Result<()> {
    let _guard = logging::init("mazecarve-profile.log")?;

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let cols = args.next().and_then(|s| s.parse::<u32>().ok()).unwrap_or(20);
    let rows = args.next().and_then(|s| s.parse::<u32>().ok()).unwrap_or(20);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    let app = App::with_grid(cols.max(1), rows.max(1));
    // Carving and backtracking each take one step per cell at most
    let max_frames = 2 * app.columns() * app.rows();
    let mut window = HeadlessWindow::closing_after(max_frames);
    let mut clock = ImmediateClock::new(app.target_fps as usize);
    let mut rng = RngSource::new(get_rng(seed)?);

    let start = std::time::Instant::now();
    let summary = app.run(&mut window, &mut clock, &mut rng)?;
    let elapsed = start.elapsed();

    println!(
        "{}x{} maze: finished at frame {:?}, {} steps, {} passages carved in {:?}",
        app.columns(),
        app.rows(),
        summary.finished_at_frame,
        summary.steps,
        summary.passages,
        elapsed
    );
    Ok(())
}
