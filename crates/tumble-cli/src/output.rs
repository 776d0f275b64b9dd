// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rendering run summaries.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::run::RunSummary;

/// Pretty JSON for `--format json`.
pub fn render_json(summary: &RunSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// One row per body, then frame and hash lines.
pub fn render_table(summary: &RunSummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Body", "Position", "Orientation", "Speed"]);
    for body in &summary.bodies {
        let [x, y, z] = body.position;
        let [qx, qy, qz, qw] = body.orientation;
        let [vx, vy, vz] = body.velocity;
        table.add_row(vec![
            body.body.to_string(),
            format!("({x:.4}, {y:.4}, {z:.4})"),
            format!("({qx:.4}, {qy:.4}, {qz:.4}, {qw:.4})"),
            format!("{:.4}", (vx * vx + vy * vy + vz * vz).sqrt()),
        ]);
    }
    format!(
        "{table}\nframes: {} ({:.4} s)\nhash: {}",
        summary.frames, summary.elapsed, summary.hash
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::run::BodySummary;

    fn sample() -> RunSummary {
        RunSummary {
            frames: 2,
            elapsed: 2.0 / 60.0,
            hash: "ab".repeat(32),
            bodies: vec![BodySummary {
                body: 1,
                position: [0.0, -1.5, 0.5],
                orientation: [0.0, 0.0, 0.0, 1.0],
                velocity: [3.0, 4.0, 0.0],
                angular_velocity: [0.0; 3],
            }],
        }
    }

    #[test]
    fn table_lists_body_and_hash() {
        let out = render_table(&sample());
        assert!(out.contains("-1.5000"));
        assert!(out.contains("5.0000"));
        assert!(out.contains(&"ab".repeat(32)));
    }

    #[test]
    fn json_is_parseable() {
        let out = render_json(&sample()).expect("json");
        let value: serde_json::Value = serde_json::from_str(&out).expect("parse");
        assert_eq!(value["frames"], 2);
        assert_eq!(value["bodies"][0]["body"], 1);
    }
}
