use pomoclock_core::{Config, IntervalKind};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let template = config.template();

    if json {
        println!("{}", serde_json::to_string_pretty(&template)?);
        return Ok(());
    }

    for (i, entry) in template.entries.iter().enumerate() {
        let color = entry
            .kind
            .parse::<IntervalKind>()
            .map(|kind| kind.color().hex())
            .unwrap_or_else(|_| "??????".into());
        println!(
            "{:>2}. {:<6} {:<10} {:>3}m{:02}s  #{}  {}",
            i + 1,
            entry.kind,
            entry.name,
            entry.length_sec / 60,
            entry.length_sec % 60,
            color,
            entry.description,
        );
    }
    println!(
        "{} intervals, {} work, {} minutes total",
        template.len(),
        template.work_count(),
        template.total_secs() / 60
    );
    Ok(())
}
