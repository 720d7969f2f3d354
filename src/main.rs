use mazecarve::{
    app::{App, TickClock},
    generators::{RngSource, get_rng},
    logging,
    window::TerminalWindow,
};

/// Parses the optional `--seed <u64>` argument.
fn parse_seed(mut args: impl Iterator<Item = String>) -> std::io::Result<Option<u64>> {
    let invalid = |msg: String| std::io::Error::new(std::io::ErrorKind::InvalidInput, msg);
    match args.next().as_deref() {
        None => Ok(None),
        Some("--seed") => args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Some)
            .ok_or_else(|| invalid("--seed expects a non-negative integer".to_string())),
        Some(other) => Err(invalid(format!("Unrecognized argument: {}", other))),
    }
}

fn main() -> std::io::Result<()> {
    let _guard = logging::init("mazecarve.log")?;
    let seed = parse_seed(std::env::args().skip(1))?;

    let app = App::default();
    // A broken entropy source is fatal
    let mut rng = RngSource::new(get_rng(seed)?);
    let mut clock = TickClock::new(app.target_fps);
    let mut window = TerminalWindow::new(&app.title, app.screen_width, app.screen_height)?;

    let result = app.run(&mut window, &mut clock, &mut rng);
    // Give the terminal back before reporting anything
    drop(window);

    let summary = result?;
    tracing::info!(
        frames = summary.frames,
        finished_at_frame = ?summary.finished_at_frame,
        "Window closed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed(args(&[])).unwrap(), None);
        assert_eq!(parse_seed(args(&["--seed", "42"])).unwrap(), Some(42));
        assert!(parse_seed(args(&["--seed"])).is_err());
        assert!(parse_seed(args(&["--seed", "-1"])).is_err());
        assert!(parse_seed(args(&["--fast"])).is_err());
    }
}
