use std::path::PathBuf;

use anyhow::{bail, Context};
use ductkit::{apply_config, format_length, init_logging, Config, DesignerState};
use tracing::warn;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.first().map(PathBuf::from) else {
        bail!("usage: ductkit <layout.duct.json> [<duct id> <length> [<output.duct.json>]]");
    };

    let config = Config::load_or_default().unwrap_or_else(|e| {
        warn!("Ignoring unreadable config: {}", e);
        Config::default()
    });

    let mut state = DesignerState::new();
    apply_config(&mut state, &config);
    state
        .load_from_file(&path)
        .with_context(|| format!("Cannot open {}", path.display()))?;

    if let (Some(duct_id), Some(length)) = (args.get(1), args.get(2)) {
        let duct_id: u64 = duct_id
            .parse()
            .with_context(|| format!("Invalid duct id: {}", duct_id))?;
        let final_length = state.set_duct_length(duct_id, length)?;
        println!(
            "duct {} set to {}",
            duct_id,
            format_length(final_length, config.length_format())
        );
        if let Some(output) = args.get(3) {
            state.save_to_file(output)?;
        }
    }

    println!(
        "{} (ductkit {}, built {})",
        state.display_name(),
        ductkit::VERSION,
        ductkit::BUILD_DATE
    );
    println!("{} parts", state.parts().len());

    for (group_id, members) in state.groups() {
        let members: Vec<String> = members
            .iter()
            .filter_map(|id| state.part(*id))
            .map(|p| format!("{} #{}", p.part_type(), p.id))
            .collect();
        println!("group {}: {}", group_id, members.join(", "));
    }

    let format = config.length_format();
    for dim in state.all_dimensions() {
        let kind = if dim.is_straight_run { "run" } else { "dim" };
        println!(
            "{} part {} {} -> part {} {}: {}",
            kind,
            dim.p1.part_id,
            dim.p1,
            dim.p2.part_id,
            dim.p2,
            format_length(dim.value, format)
        );
    }

    Ok(())
}
