use super::histogram::query_index;
use super::strategy::ScoringStrategy;
use super::types::{
    CheckedMap, CheckedMonth, Classification, Evaluation, LabelRate, LabelShare, MonthBreakdown,
};
use crate::config::{AnalyzerConfig, OutOfRangePolicy};
use crate::consts::{CASUAL_REL_LABEL, CLOSE_REL_LABEL, FRIENDS_LABEL};
use crate::model::{PropertyItem, PropertyModel};
use crate::store::{scalar_value, SourceDocument};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Accumulated rates keyed by label index.
type RateAcc = BTreeMap<usize, (String, f64)>;

/// Rates of every label holding a histogram for `item`, in label order.
pub fn rate_labels(
    strategy: &dyn ScoringStrategy,
    item: &PropertyItem,
    value: f64,
    policy: OutOfRangePolicy,
) -> Vec<LabelRate> {
    if item.is_degenerate() {
        return Vec::new();
    }
    let index = query_index(value, item, policy);
    item.labels
        .values()
        .map(|pl| LabelRate {
            label: pl.label.clone(),
            label_index: pl.label_index,
            rate: strategy.rate(&pl.histogram, index),
        })
        .collect()
}

/// Scores every month of `sample` and aggregates the result.
pub fn evaluate(
    model: &PropertyModel,
    strategy: &dyn ScoringStrategy,
    config: &AnalyzerConfig,
    sample: &SourceDocument,
) -> Evaluation {
    let mut checked = CheckedMap::new();
    if sample.months.is_empty() {
        debug!("Sample has no months, nothing to classify");
        return Evaluation::default();
    }

    let mut global = RateAcc::new();
    let mut global_sum = 0.0;
    let mut months = Vec::with_capacity(sample.months.len());
    let mut lines = Vec::with_capacity(sample.months.len());

    for (month, fields) in &sample.months {
        let mut rates = RateAcc::new();

        for (property, raw) in fields {
            if !config.allows(property) {
                continue;
            }
            let Some(value) = scalar_value(raw) else {
                continue;
            };
            let Some(item) = model.get(property) else {
                debug!("Unknown property '{}' in sample, skipped", property);
                continue;
            };
            if item.is_degenerate() {
                continue;
            }

            for lr in rate_labels(strategy, item, value, config.out_of_range) {
                add_rate(&mut rates, &lr);
                add_rate(&mut global, &lr);
            }

            checked
                .entry(property.clone())
                .or_default()
                .push(CheckedMonth {
                    month: month.clone(),
                    value,
                    minimum: item.minimum,
                    maximum: item.maximum,
                    property: property.clone(),
                });
        }

        let month_sum: f64 = rates.values().map(|(_, r)| r).sum();
        global_sum += month_sum;

        let shares = rank(&rates, month_sum);
        lines.push(format!("{}: {}", month, format_shares(&shares)));
        months.push(MonthBreakdown {
            month: month.clone(),
            shares,
        });
    }

    if global_sum <= 0.0 {
        debug!("No property of the sample matched the model");
        return Evaluation {
            checked,
            ..Evaluation::default()
        };
    }

    let ranking = rank(&global, global_sum);
    let mut result = ranking
        .first()
        .map(|s| s.label.clone())
        .unwrap_or_default();

    if config.friends_mode {
        let casual = rate_of(&global, CASUAL_REL_LABEL);
        let close = rate_of(&global, CLOSE_REL_LABEL);
        let friends = casual + close;
        let best = ranking.first().map_or(0.0, |s| s.rate);
        if friends > 0.0 && friends >= best {
            result = friends_winner(casual, close);
        }
    }

    info!("Sample attributed to '{}'", result);

    Evaluation {
        classification: Classification {
            result,
            percents: format_shares(&ranking),
            string: lines.join("\n").trim().to_string(),
        },
        ranking,
        months,
        checked,
    }
}

fn add_rate(acc: &mut RateAcc, lr: &LabelRate) {
    acc.entry(lr.label_index)
        .or_insert_with(|| (lr.label.clone(), 0.0))
        .1 += lr.rate;
}

fn rate_of(acc: &RateAcc, label: &str) -> f64 {
    acc.values()
        .find(|(name, _)| name == label)
        .map_or(0.0, |(_, r)| *r)
}

/// Display name of the composite label, after its stronger constituent.
pub fn friends_winner(casual: f64, close: f64) -> String {
    let inner = if casual > close {
        CASUAL_REL_LABEL
    } else {
        CLOSE_REL_LABEL
    };
    format!("{} ({})", FRIENDS_LABEL, inner)
}

/// Non-zero rates, highest first; equal rates keep label order.
fn rank(acc: &RateAcc, sum: f64) -> Vec<LabelShare> {
    let mut shares: Vec<LabelShare> = acc
        .iter()
        .filter(|(_, (_, rate))| *rate > 0.0)
        .map(|(&idx, (label, rate))| LabelShare {
            label: label.clone(),
            label_index: idx,
            rate: *rate,
            percent: percent(*rate, sum),
        })
        .collect();
    shares.sort_by(|a, b| b.rate.total_cmp(&a.rate));
    shares
}

/// `rate / sum` as a percentage truncated to one decimal place.
pub fn percent(rate: f64, sum: f64) -> f64 {
    if sum <= 0.0 {
        return 0.0;
    }
    (rate * 1000.0 / sum).floor() / 10.0
}

pub fn format_shares(shares: &[LabelShare]) -> String {
    shares
        .iter()
        .map(|s| format!("{} ({}%)", s.label, s.percent))
        .collect::<Vec<_>>()
        .join(", ")
}
