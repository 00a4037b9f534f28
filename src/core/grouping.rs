use crate::domain::model::{Group, Participant};
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_LABEL_TEMPLATE: &str = "第 {n} 組";

/// Fixed-size random partitioning.
#[derive(Debug, Clone)]
pub struct GroupingEngine {
    label_template: String,
}

impl Default for GroupingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_TEMPLATE)
    }
}

impl GroupingEngine {
    /// `label_template` must contain `{n}`, replaced by the 1-based group number.
    pub fn new(label_template: impl Into<String>) -> Self {
        Self {
            label_template: label_template.into(),
        }
    }

    pub fn label(&self, number: usize) -> String {
        self.label_template.replace("{n}", &number.to_string())
    }

    /// Shuffles the pool and slices it into groups of `group_size`; the last
    /// group holds the remainder.
    ///
    /// Callers reject `group_size < 2` before calling. A zero size yields an
    /// empty result rather than a panic.
    pub fn group<R: Rng + ?Sized>(
        &self,
        pool: &[Participant],
        group_size: usize,
        rng: &mut R,
    ) -> Vec<Group> {
        if pool.is_empty() {
            tracing::debug!("Grouping skipped: pool is empty");
            return Vec::new();
        }
        if group_size == 0 {
            tracing::warn!("Grouping skipped: group size is zero");
            return Vec::new();
        }

        let mut shuffled = pool.to_vec();
        shuffled.shuffle(rng);

        let groups: Vec<Group> = shuffled
            .chunks(group_size)
            .enumerate()
            .map(|(i, members)| Group {
                id: format!("group-{}", i),
                name: self.label(i + 1),
                members: members.to_vec(),
            })
            .collect();

        tracing::info!(
            "Grouped {} participants into {} groups of up to {}",
            pool.len(),
            groups.len(),
            group_size
        );
        groups
    }
}

/// 預計組數
pub fn expected_group_count(pool_size: usize, group_size: usize) -> usize {
    if group_size == 0 {
        return 0;
    }
    pool_size.div_ceil(group_size)
}
