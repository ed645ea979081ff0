// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

//! Text insights derived from aggregated views.

use crate::aggregator::{LevelFilter, RankInsight, TypeShare};
use crate::facility::Level;
use num_format::{Locale, ToFormattedString};

pub const DISPARITY_STATEMENT: &str = "There is a significant regional disparity between governorates and districts, \
where tourism infrastructure in some areas is heavily concentrated, while in others it remains very limited, \
highlighting the imbalance in tourism development across Lebanon.";
pub const NO_SELECTION_PROMPT: &str = "Select at least one facility type to display Chart 2.";
pub const NO_FACILITIES_MESSAGE: &str = "No facilities to analyze with the current filters.";

pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

pub fn rank_lines(level: Level, insight: &RankInsight) -> Vec<String> {
    vec![
        format!(
            "Highest {level}: {} - {} facilities",
            insight.highest.area,
            format_count(insight.highest.value)
        ),
        format!(
            "Lowest {level}: {} - {} facilities",
            insight.lowest.area,
            format_count(insight.lowest.value)
        ),
        format!(
            "Gap ({}): {} facilities",
            LevelFilter::from(level).label(),
            format_count(insight.gap)
        ),
    ]
}

/// At most three lines: the top type, the runner-up, and the top type's
/// share restated. Expects shares ordered largest first.
pub fn share_lines(shares: &[TypeShare]) -> Vec<String> {
    let Some(top) = shares.first() else {
        return Vec::new();
    };
    let mut lines = vec![format!(
        "{} are the most common, making up {:.1}% of selected facilities.",
        top.facility_type, top.share
    )];
    if let Some(second) = shares.get(1) {
        lines.push(format!(
            "{} are the second most common, accounting for {:.1}%.",
            second.facility_type, second.share
        ));
    }
    lines.push(format!(
        "{} alone account for nearly {:.1}% of all selected facilities.",
        top.facility_type, top.share
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::AreaRow;
    use crate::facility::{FacilityCounts, FacilityType};

    fn row(area: &str, value: u64) -> AreaRow {
        AreaRow {
            area: area.to_string(),
            counts: FacilityCounts::default(),
            value,
        }
    }

    #[test]
    fn counts_use_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn rank_lines_name_level_and_gap() {
        let insight = RankInsight {
            highest: row("Matn", 2345),
            lowest: row("Hermel", 12),
            gap: 2333,
        };
        assert_eq!(
            rank_lines(Level::District, &insight),
            vec![
                "Highest District: Matn - 2,345 facilities".to_string(),
                "Lowest District: Hermel - 12 facilities".to_string(),
                "Gap (Districts): 2,333 facilities".to_string(),
            ]
        );
    }

    #[test]
    fn single_share_skips_runner_up() {
        let shares = vec![TypeShare {
            facility_type: FacilityType::Cafes,
            total: 9,
            share: 100.0,
        }];
        let lines = share_lines(&shares);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Cafes are the most common, making up 100.0% of selected facilities."
        );
        assert!(share_lines(&[]).is_empty());
    }
}
