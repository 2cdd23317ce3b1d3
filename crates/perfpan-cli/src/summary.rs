use std::path::Path;

use console::Style;
use perfpan_core::mask::Threshold;
use perfpan_core::{FrameAlignment, OffsetOrigin, PanEstimator};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    warning: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            warning: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_path_row(s: &Styles, label: &str, path: Option<&Path>) {
    match path {
        Some(p) => println!(
            "    {:<12}{}",
            s.label.apply_to(label),
            s.path.apply_to(p.display())
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to(label),
            s.disabled.apply_to("none")
        ),
    }
}

pub fn print_align_summary(
    input: &Path,
    total_frames: usize,
    estimator: &PanEstimator,
    threshold: Option<&Threshold>,
) {
    let s = Styles::new();
    let config = estimator.config();

    println!();
    println!("  {}", s.title.apply_to("PerfPan Alignment"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(total_frames)
    );
    match threshold {
        Some(t) => println!(
            "  {:<14}{}",
            s.label.apply_to("Binarize"),
            s.method.apply_to(t)
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Binarize"),
            s.disabled.apply_to("input is a mask")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Search"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Strategy"),
        s.method.apply_to(estimator.strategy())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scoring"),
        s.method.apply_to(estimator.policy())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Reference"),
        s.value.apply_to(config.reference_frame)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Blank"),
        s.value.apply_to(format!("{:.2}%", config.blank_threshold * 100.0))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("On limit"),
        if config.copy_on_limit {
            s.value.apply_to("copy previous")
        } else {
            s.disabled.apply_to("keep")
        }
    );
    println!();

    println!("  {}", s.header.apply_to("Files"));
    print_path_row(&s, "Hints", config.hint_path());
    print_path_row(&s, "Log", config.log_path());
    print_path_row(&s, "Plot", config.plot_path());
    if !estimator.store().is_empty() {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Seeded"),
            s.value.apply_to(format!("{} frame(s)", estimator.store().len()))
        );
    }
    println!();
}

pub fn print_results(results: &[FrameAlignment], estimator: &PanEstimator, quiet: bool) {
    let s = Styles::new();

    if !quiet {
        println!();
        println!(
            "{:>7}  {:>5}  {:>5}  {:>10}  {:<12}  {}",
            "Frame", "dx", "dy", "Score", "Limit", "Origin"
        );
        println!("{}", "-".repeat(55));
        for a in results {
            let score = match a.score {
                Some(v) => format!("{:>10.5}", v),
                None => format!("{:>10}", "-"),
            };
            let limit = format!("{:<12}", a.limit);
            let limit = if a.limit.is_empty() {
                s.label.apply_to(limit)
            } else {
                s.warning.apply_to(limit)
            };
            println!(
                "{:>7}  {:>5}  {:>5}  {}  {}  {}",
                a.frame, a.dx, a.dy, score, limit, a.origin
            );
        }
    }

    let count = |origin: OffsetOrigin| results.iter().filter(|a| a.origin == origin).count();
    let at_limit = results.iter().filter(|a| !a.limit.is_empty()).count();
    let unscored = results.iter().filter(|a| a.score.is_none()).count();

    println!();
    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Aligned"),
        s.value.apply_to(results.len())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Searched"),
        s.value.apply_to(estimator.searches_run())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("From hints"),
        s.value.apply_to(count(OffsetOrigin::Hint))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Copied"),
        s.value.apply_to(count(OffsetOrigin::CopiedOnLimit))
    );
    if at_limit > 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("At limit"),
            s.warning.apply_to(at_limit)
        );
    }
    if unscored > 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("No score"),
            s.warning.apply_to(unscored)
        );
    }

    if let (Some(min_dx), Some(max_dx)) = (
        results.iter().map(|a| a.dx).min(),
        results.iter().map(|a| a.dx).max(),
    ) {
        let min_dy = results.iter().map(|a| a.dy).min().unwrap_or(0);
        let max_dy = results.iter().map(|a| a.dy).max().unwrap_or(0);
        println!(
            "    {:<12}{}",
            s.label.apply_to("Pan range"),
            s.value.apply_to(format!(
                "x {}..{}, y {}..{}",
                min_dx, max_dx, min_dy, max_dy
            ))
        );
    }
    println!();
}
