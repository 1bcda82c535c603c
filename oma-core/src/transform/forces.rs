//! Channel extraction from channel-encoding point loads.
//!
//! In the analysis model each channel is a point load: the force component
//! gives the axis, its sign the direction and its magnitude the channel
//! number (a 3 kN force along -U2 is channel 3 pointing in -Y).

use crate::config::rounding::round_coord;
use crate::config::CollisionPolicy;
use crate::error::{GeometryError, Result};
use crate::model::{Axis, Channel, Direction};
use crate::session::PointLoad;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Channel number encoded by a force magnitude (integer part of `|force|`).
///
/// The magnitude is first rounded to `COORD_DECIMALS` places so that unit
/// conversion noise (`2.9999999999`) does not drop a channel number.
pub fn channel_number(force: f64) -> u32 {
    round_coord(force.abs()).trunc() as u32
}

/// Extract the channels encoded by the loads of one load pattern.
///
/// Loads are processed in order and, per load, axes 1, 2, 3 in order. Every
/// force component of magnitude 1 or more yields one channel; smaller nonzero
/// components encode channel 0 and are skipped with a warning. When two
/// components encode the same number, `policy` decides: with `LastWriteWins`
/// the one processed last is kept. The result is sorted by channel number.
pub fn extract_channels(loads: &[PointLoad], policy: CollisionPolicy) -> Result<Vec<Channel>> {
    let mut channels: BTreeMap<u32, Channel> = BTreeMap::new();

    for load in loads {
        let forces = load.forces();
        for axis in Axis::ALL {
            let value = forces[axis.index()];
            if value == 0.0 {
                continue;
            }

            let number = channel_number(value);
            if number == 0 {
                warn!(
                    "Ignoring load {} on point {} ({:?}): magnitude below 1 encodes no channel",
                    value, load.point, axis
                );
                continue;
            }

            let channel = Channel::with_symbol(
                number,
                load.point.clone(),
                Direction::along(axis, value < 0.0),
            );

            if let Some(previous) = channels.get(&number) {
                match policy {
                    CollisionPolicy::Reject => {
                        return Err(GeometryError::ChannelCollision {
                            number,
                            first: previous.point.clone(),
                            second: load.point.clone(),
                        });
                    }
                    CollisionPolicy::LastWriteWins => {
                        warn!(
                            "Channel {} defined at point {} is replaced by point {}",
                            number, previous.point, load.point
                        );
                    }
                }
            }

            debug!(
                "Channel {} -> point {} ({})",
                number,
                channel.point,
                channel.symbol.map(|s| s.as_str()).unwrap_or("?")
            );
            channels.insert(number, channel);
        }
    }

    Ok(channels.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DirectionSymbol;

    fn load(point: &str, forces: [f64; 3]) -> PointLoad {
        PointLoad::force(point, "References", forces)
    }

    #[test]
    fn test_single_negative_component() {
        let channels =
            extract_channels(&[load("J5", [0.0, -3.0, 0.0])], CollisionPolicy::default()).unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].number, 3);
        assert_eq!(channels[0].point, "J5");
        assert_eq!(channels[0].direction.vector(), [0.0, -1.0, 0.0]);
        assert_eq!(channels[0].symbol, Some(DirectionSymbol::NegU2));
    }

    #[test]
    fn test_every_component_is_a_channel() {
        let channels = extract_channels(
            &[load("1", [2.0, 0.0, -1.0]), load("2", [0.0, 3.0, 0.0])],
            CollisionPolicy::default(),
        )
        .unwrap();
        let summary: Vec<(u32, &str, &str)> = channels
            .iter()
            .map(|c| (c.number, c.point.as_str(), c.symbol.unwrap().as_str()))
            .collect();
        assert_eq!(summary, vec![(1, "1", "-U3"), (2, "1", "U1"), (3, "2", "U2")]);
    }

    #[test]
    fn test_sorted_numerically() {
        let channels = extract_channels(
            &[
                load("A", [10.0, 0.0, 0.0]),
                load("B", [2.0, 0.0, 0.0]),
                load("C", [1.0, 0.0, 0.0]),
            ],
            CollisionPolicy::default(),
        )
        .unwrap();
        let numbers: Vec<u32> = channels.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn test_collision_last_write_wins() {
        // Processing order: point P axis 1, P axis 2, then Q axis 3.
        let channels = extract_channels(
            &[load("P", [4.0, -4.0, 0.0]), load("Q", [0.0, 0.0, 4.0])],
            CollisionPolicy::LastWriteWins,
        )
        .unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].point, "Q");
        assert_eq!(channels[0].direction, Direction::PosZ);

        let channels = extract_channels(
            &[load("P", [4.0, -4.0, 0.0])],
            CollisionPolicy::LastWriteWins,
        )
        .unwrap();
        assert_eq!(channels[0].direction, Direction::NegY);
    }

    #[test]
    fn test_collision_rejected() {
        let result = extract_channels(
            &[load("P", [4.0, 0.0, 0.0]), load("Q", [0.0, 0.0, 4.0])],
            CollisionPolicy::Reject,
        );
        match result {
            Err(GeometryError::ChannelCollision {
                number,
                first,
                second,
            }) => {
                assert_eq!(number, 4);
                assert_eq!(first, "P");
                assert_eq!(second, "Q");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_channel_number_truncates() {
        assert_eq!(channel_number(3.0), 3);
        assert_eq!(channel_number(-3.7), 3);
        assert_eq!(channel_number(2.999_999_999_9), 3);
        assert_eq!(channel_number(0.4), 0);
    }

    #[test]
    fn test_fractional_load_is_skipped() {
        let channels =
            extract_channels(&[load("1", [0.5, 0.0, 0.0])], CollisionPolicy::Reject).unwrap();
        assert!(channels.is_empty());

        // Only the sub-unit component of a load is dropped.
        let channels =
            extract_channels(&[load("1", [0.5, -2.0, 0.0])], CollisionPolicy::Reject).unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].number, 2);
        assert_eq!(channels[0].direction, Direction::NegY);
    }

    #[test]
    fn test_no_loads() {
        assert!(extract_channels(&[], CollisionPolicy::default())
            .unwrap()
            .is_empty());
    }
}
