use std::cmp::Ordering;
use std::collections::HashMap;

use namap_bench_model::{ResultGroup, ResultRecord};

/// Group records by benchmark and rank each group by total fidelity.
///
/// Groups keep the order in which their benchmark was first seen. Within a group records are
/// sorted by descending fidelity. The sort is stable, so records with equal fidelity keep their
/// insertion order. Records without a fidelity are ranked last.
pub fn aggregate(records: impl IntoIterator<Item = ResultRecord>) -> Vec<ResultGroup> {
    let mut index = HashMap::<String, usize>::new();
    let mut groups = Vec::<ResultGroup>::new();

    for record in records {
        if record.metrics.fidelity.is_none() {
            log::warn!(
                "Result for {} from run {} has no fidelity, it will be ranked last",
                record.benchmark,
                record.run_idx
            );
        }

        match index.get(&record.benchmark) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(record.benchmark.clone(), groups.len());
                groups.push(ResultGroup {
                    benchmark: record.benchmark.clone(),
                    records: vec![record],
                });
            }
        }
    }

    for group in &mut groups {
        group.records.sort_by(by_fidelity_descending);
    }

    groups
}

/// The top ranked record of each group, in group order.
pub fn best_per_group(groups: &[ResultGroup]) -> Vec<&ResultRecord> {
    groups.iter().filter_map(ResultGroup::best).collect()
}

fn by_fidelity_descending(a: &ResultRecord, b: &ResultRecord) -> Ordering {
    match (a.metrics.fidelity, b.metrics.fidelity) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
