//! Reference model of the blend substrate
//!
//! Evaluates node trees the way the host runtime does, for verification and
//! previews. One call is one frame: every layer reads the same parameter
//! snapshot and layers later in the list overwrite the channels they animate.
//!
//! Weighted inputs are used as given, never clamped. A normalized mix whose
//! weights sum to zero yields non-finite values.

use std::collections::BTreeMap;

use crate::assembler::AssembledTarget;
use crate::graph::Node;

/// Parameter name to live value
pub type ParameterValues = BTreeMap<String, f32>;

/// Channel name to emitted value; absent channels emit zero
pub type ChannelValues = BTreeMap<String, f32>;

/// Blend position of `value` between thresholds `t0` and `t1`, clamped to `0..=1`
///
/// With equal thresholds the position steps from 0 to 1 at the threshold.
pub fn blend_position(value: f32, t0: f32, t1: f32) -> f32 {
    if t1 == t0 {
        return if value < t0 { 0.0 } else { 1.0 };
    }
    ((value - t0) / (t1 - t0)).clamp(0.0, 1.0)
}

fn read(inputs: &ParameterValues, name: &str) -> f32 {
    inputs.get(name).copied().unwrap_or(0.0)
}

/// Evaluate one tree against live parameter values
pub fn evaluate(node: &Node, inputs: &ParameterValues) -> ChannelValues {
    match node {
        Node::Constant {
            parameter, value, ..
        } => ChannelValues::from([(parameter.clone(), *value)]),
        Node::Empty { .. } => ChannelValues::new(),
        Node::Interpolate1D {
            driver,
            t0,
            start,
            t1,
            end,
            ..
        } => {
            let t = blend_position(read(inputs, driver), *t0, *t1);
            let a = evaluate(start, inputs);
            let b = evaluate(end, inputs);

            let mut out = ChannelValues::new();
            for channel in a.keys().chain(b.keys()) {
                let from = a.get(channel).copied().unwrap_or(0.0);
                let to = b.get(channel).copied().unwrap_or(0.0);
                out.insert(channel.clone(), from + (to - from) * t);
            }
            out
        }
        Node::Mix {
            children,
            normalized,
            ..
        } => {
            let mut out = ChannelValues::new();
            let mut total_weight = 0.0;
            for child in children {
                let weight = read(inputs, &child.weight);
                total_weight += weight;
                for (channel, value) in evaluate(&child.node, inputs) {
                    *out.entry(channel).or_insert(0.0) += weight * value;
                }
            }
            if *normalized {
                for value in out.values_mut() {
                    *value /= total_weight;
                }
            }
            out
        }
    }
}

/// Run one frame of an assembled target
///
/// Declared parameters start at 0 (the unit parameter at 1) and are
/// overridden by `inputs`. Returns every declared or supplied parameter
/// after all layers have written their channels.
pub fn run_frame(
    assembled: &AssembledTarget,
    inputs: &ParameterValues,
    one_parameter: &str,
) -> ParameterValues {
    let mut snapshot: ParameterValues = assembled
        .parameters
        .iter()
        .map(|name| {
            let default = if name == one_parameter { 1.0 } else { 0.0 };
            (name.clone(), default)
        })
        .collect();
    snapshot.extend(inputs.iter().map(|(k, v)| (k.clone(), *v)));

    let mut state = snapshot.clone();
    for layer in &assembled.layers {
        state.extend(evaluate(&layer.tree, &snapshot));
    }
    state
}
