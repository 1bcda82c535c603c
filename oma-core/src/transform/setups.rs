//! Probing of the reference and setup load patterns.

use super::forces::extract_channels;
use crate::config::ExportConfig;
use crate::error::Result;
use crate::model::{Channel, Setup, SetupPlan};
use crate::session::{PointLoad, StructuralModel, UnitGuard};
use tracing::{debug, info};

/// Read the channels encoded by the loads of one load pattern.
///
/// Loads of `config.load_group` are queried in the session's present units;
/// a failed query is logged and treated as no loads.
pub fn read_pattern_channels<S: StructuralModel + ?Sized>(
    session: &S,
    config: &ExportConfig,
    pattern: &str,
) -> Result<Vec<Channel>> {
    let loads: Vec<PointLoad> = session
        .point_loads(&config.load_group)
        .or_default_warn("Point loads")
        .into_iter()
        .filter(|load| load.load_pattern == pattern)
        .collect();

    debug!("Load pattern {}: {} point load(s)", pattern, loads.len());
    extract_channels(&loads, config.collision_policy)
}

/// Read the reference channels and every setup after them.
///
/// `Setup_1`, `Setup_2`, ... are probed until the first pattern without
/// channels. Loads are read with the model switched to the units of
/// `config.force_unit`; the original units are restored before returning,
/// also when extraction fails.
pub fn probe_setups<S: StructuralModel + ?Sized>(
    session: &mut S,
    config: &ExportConfig,
) -> Result<SetupPlan> {
    let guard = UnitGuard::switch(session, config.force_unit.query_units());

    let references = Setup {
        name: config.references_pattern.clone(),
        channels: read_pattern_channels(&*guard, config, &config.references_pattern)?,
    };

    let mut setups = Vec::new();
    loop {
        let name = config.setup_pattern(setups.len() + 1);
        let channels = read_pattern_channels(&*guard, config, &name)?;
        if channels.is_empty() {
            debug!("{} has no channels, stopping", name);
            break;
        }
        setups.push(Setup { name, channels });
    }

    let plan = SetupPlan { references, setups };
    info!(
        "Found {} reference channel(s) and {} setup(s), {} channel(s) in total",
        plan.references.channels.len(),
        plan.n_setups(),
        plan.channel_count()
    );
    Ok(plan)
}
