use std::io::{self, Write};

use chrono::Local;
use weather_now_core::{
    Clock, ClockReading, Report, WeatherRecord,
    clock::DEFAULT_TICK,
    present::{self, clock_line},
};

pub fn print_title() {
    println!("{}", present::TITLE);
}

/// Shown while the single request is in flight; goes to stderr so `--json`
/// output stays parseable.
pub fn print_loading() {
    eprintln!("{}", present::LOADING);
}

pub fn print_error(message: &str) {
    eprintln!("⚠️  {message}");
}

pub fn print_report(record: &WeatherRecord) {
    let report = Report::build(record, &ClockReading::now());
    print!("{report}");
    print_observed_at(record);
}

pub fn print_json(record: &WeatherRecord) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

/// Report without the static date line, followed by a ticking clock line.
pub async fn print_live(record: &WeatherRecord) -> anyhow::Result<()> {
    let report = Report::build(record, &ClockReading::now());
    println!("{}", report.heading);
    for line in &report.lines {
        println!("{line}");
    }
    print_observed_at(record);

    run_clock(None).await
}

/// Redraw the clock line in place every tick until Ctrl-C, or until `ticks`
/// updates have been drawn.
pub async fn run_clock(ticks: Option<u32>) -> anyhow::Result<()> {
    let clock = Clock::spawn(DEFAULT_TICK);
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    drive_clock(&clock, &mut io::stdout(), ticks, shutdown).await
}

/// Initial line, then one redraw per published reading until `ticks` redraws
/// are done, the clock stops, or `shutdown` resolves.
async fn drive_clock<W, S>(
    clock: &Clock,
    out: &mut W,
    ticks: Option<u32>,
    shutdown: S,
) -> anyhow::Result<()>
where
    W: Write,
    S: Future<Output = ()>,
{
    let mut readings = clock.subscribe();
    tokio::pin!(shutdown);

    draw_clock(out, &readings.borrow_and_update())?;

    let mut remaining = ticks;
    while remaining != Some(0) {
        tokio::select! {
            changed = readings.changed() => {
                if changed.is_err() {
                    break;
                }
                let reading = readings.borrow_and_update().clone();
                draw_clock(out, &reading)?;
                if let Some(n) = remaining.as_mut() {
                    *n -= 1;
                }
            }
            _ = &mut shutdown => break,
        }
    }

    writeln!(out)?;
    Ok(())
}

fn draw_clock<W: Write>(out: &mut W, reading: &ClockReading) -> io::Result<()> {
    // carriage return + clear line, so the line is rewritten in place
    write!(out, "\r\x1b[2K{}", clock_line(reading))?;
    out.flush()
}

fn print_observed_at(record: &WeatherRecord) {
    if let Some(observed) = record.observed_at {
        println!("   (observed {})", observed.with_timezone(&Local).format("%H:%M"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    fn counting_clock() -> Clock {
        let calls = Arc::new(AtomicUsize::new(0));
        Clock::spawn_with(Duration::from_secs(1), move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            ClockReading { time: format!("00:0{n}"), date: "Tue Oct 20 2026".into() }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_limit_draws_initial_line_plus_redraws() {
        let clock = counting_clock();
        let mut buf = Vec::new();

        drive_clock(&clock, &mut buf, Some(2), std::future::pending()).await.expect("clock runs");

        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.matches("\r\x1b[2K").count(), 3);
        assert!(text.contains("00:00"));
        assert!(text.contains("00:01"));
        assert!(text.ends_with("00:02  Current Date: Tue Oct 20 2026\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_unbounded_clock() {
        let clock = counting_clock();
        let mut buf = Vec::new();

        drive_clock(&clock, &mut buf, None, async {}).await.expect("clock runs");

        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.matches("\r\x1b[2K").count(), 1);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn clock_line_is_redrawn_in_place() {
        let mut buf = Vec::new();
        let reading = ClockReading { time: "08:15".into(), date: "Tue Oct 20 2026".into() };

        draw_clock(&mut buf, &reading).expect("write to vec");

        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("\r\x1b[2K"));
        assert!(text.ends_with("🕒 08:15  Current Date: Tue Oct 20 2026"));
        assert!(!text.contains('\n'));
    }
}
