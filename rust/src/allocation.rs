//! Channel quota allocation with exact-sum rounding correction.

use std::collections::HashMap;
use thiserror::Error;

use rustc_hash::FxHashSet;

use crate::models::ChannelWeight;

/// Invalid allocation inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    #[error("At least one channel is required")]
    NoChannels,
    #[error("Channel '{channel}' has invalid weight {weight}; weights must be finite and > 0")]
    InvalidWeight { channel: String, weight: f64 },
    #[error("Channel '{0}' appears more than once")]
    DuplicateChannel(String),
    #[error("Total quota must be non-negative, got {0}")]
    NegativeQuota(i64),
}

/// Convert a signed quota from an untyped boundary, rejecting negatives.
pub fn checked_quota(total_quota: i64) -> Result<u32, AllocationError> {
    if total_quota < 0 {
        return Err(AllocationError::NegativeQuota(total_quota));
    }
    Ok(u32::try_from(total_quota).unwrap_or(u32::MAX))
}

/// Index of the channel absorbing the rounding remainder.
///
/// Highest weight among channels not marked reduced-cadence; if every channel
/// is reduced-cadence, highest weight overall. Ties go to the earliest channel
/// in input order.
fn primary_channel(channels: &[ChannelWeight]) -> usize {
    heaviest(channels, |c| !c.reduced_cadence)
        .or_else(|| heaviest(channels, |_| true))
        .unwrap_or(0)
}

/// First channel with the strictly highest weight among those passing `eligible`.
fn heaviest(
    channels: &[ChannelWeight],
    eligible: impl Fn(&ChannelWeight) -> bool,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, channel) in channels.iter().enumerate() {
        if eligible(channel) && best.map_or(true, |(_, w)| channel.weight > w) {
            best = Some((i, channel.weight));
        }
    }
    best.map(|(i, _)| i)
}

fn validate(channels: &[ChannelWeight]) -> Result<(), AllocationError> {
    if channels.is_empty() {
        return Err(AllocationError::NoChannels);
    }
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for channel in channels {
        if !channel.weight.is_finite() || channel.weight <= 0.0 {
            return Err(AllocationError::InvalidWeight {
                channel: channel.channel_id.clone(),
                weight: channel.weight,
            });
        }
        if !seen.insert(channel.channel_id.as_str()) {
            return Err(AllocationError::DuplicateChannel(channel.channel_id.clone()));
        }
    }
    Ok(())
}

/// Split `total_quota` across channels in proportion to their weights.
///
/// Each share is rounded half away from zero; the difference between the
/// rounded sum and `total_quota` goes to the primary channel (see
/// [`primary_channel`]). The result always sums to exactly `total_quota`.
///
/// # Errors
/// * `AllocationError::NoChannels` for an empty channel list
/// * `AllocationError::InvalidWeight` for a non-positive or non-finite weight
/// * `AllocationError::DuplicateChannel` if a channel id repeats
pub fn allocate(
    total_quota: u32,
    channels: &[ChannelWeight],
) -> Result<HashMap<String, u32>, AllocationError> {
    validate(channels)?;

    let total_weight: f64 = channels.iter().map(|c| c.weight).sum();
    let total = i64::from(total_quota);

    let mut counts: Vec<i64> = channels
        .iter()
        .map(|c| (total as f64 * c.weight / total_weight).round() as i64)
        .collect();

    let remainder = total - counts.iter().sum::<i64>();
    if remainder != 0 {
        let primary = primary_channel(channels);
        counts[primary] += remainder;

        // Over-rounding can exceed the primary's own share; take the excess
        // from the heaviest remaining channels so no count goes negative
        if counts[primary] < 0 {
            let mut deficit = -counts[primary];
            counts[primary] = 0;

            let mut order: Vec<usize> = (0..channels.len()).filter(|&i| i != primary).collect();
            order.sort_by(|&a, &b| channels[b].weight.total_cmp(&channels[a].weight));
            for i in order {
                let taken = counts[i].min(deficit);
                counts[i] -= taken;
                deficit -= taken;
                if deficit == 0 {
                    break;
                }
            }
        }
    }

    Ok(channels
        .iter()
        .zip(counts)
        .map(|(c, count)| (c.channel_id.clone(), u32::try_from(count).unwrap_or(0)))
        .collect())
}
