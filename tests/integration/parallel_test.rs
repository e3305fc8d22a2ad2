use std::rc::Rc;

use sqleq_symtab::parallel::{ParallelConfig, run_partitioned};
use sqleq_symtab::{Session, SymtabError, TableIdSource, TableSchema, propagate_grouping};

use crate::init_tracing;

const BOUND: usize = 8;

/// One worker's job: encode a grouped table for each hypothesis in its chunk
/// and tie an alias to it, all inside a private session.
fn check_hypotheses(chunk: &[usize]) -> sqleq_symtab::Result<Vec<(usize, usize, bool)>> {
    let mut session = Session::new();
    let base = Rc::new(TableSchema::new(session.next_table_id(), "Invoices", BOUND));
    let mut results = Vec::with_capacity(chunk.len());

    for &groups in chunk {
        let grouped = TableSchema::derived(
            session.next_table_id(),
            "grouped",
            BOUND,
            vec![Rc::clone(&base)],
        );
        grouped.ctx().groups_considered().insert(groups);
        let mut alias = TableSchema::new(session.next_table_id(), "alias", BOUND);

        let summary = propagate_grouping(&grouped, &mut alias, &mut session)?;
        results.push((groups, summary.assertions, session.is_consistent()));
    }
    Ok(results)
}

#[test]
fn test_hypotheses_checked_across_workers_in_order() {
    init_tracing();
    let hypotheses: Vec<usize> = (1..=7).collect();
    let config = ParallelConfig::default().with_workers(3);

    let run = run_partitioned(&hypotheses, &config, |_, chunk| check_hypotheses(chunk)).unwrap();

    let order: Vec<usize> = run.outputs.iter().map(|&(g, _, _)| g).collect();
    assert_eq!(order, hypotheses);
    for &(groups, assertions, consistent) in &run.outputs {
        assert_eq!(assertions, groups * BOUND + 1);
        assert!(consistent);
    }

    let items: Vec<usize> = run.worker_statistics.iter().map(|s| s.items).collect();
    assert_eq!(items, vec![3, 2, 2]);
}

#[test]
fn test_worker_configuration_error_surfaces() {
    let hypotheses: Vec<usize> = vec![2];
    let config = ParallelConfig::default()
        .with_workers(2)
        .with_skip_empty_chunks(false);

    // The empty chunk's worker propagates from a table with no hypotheses.
    let err = run_partitioned(&hypotheses, &config, |ctx, chunk| {
        if chunk.is_empty() {
            let mut session = Session::new();
            let base = Rc::new(TableSchema::new(session.next_table_id(), "T", BOUND));
            let grouped = TableSchema::derived(session.next_table_id(), "g", BOUND, vec![base]);
            let mut alias = TableSchema::new(session.next_table_id(), "a", BOUND);
            propagate_grouping(&grouped, &mut alias, &mut session)?;
            return Ok(vec![ctx.worker_id]);
        }
        check_hypotheses(chunk).map(|_| vec![ctx.worker_id])
    })
    .unwrap_err();

    assert!(matches!(err, SymtabError::NoGroupsConsidered { .. }));
}

#[test]
fn test_zero_workers_is_degenerate() {
    let items = [1, 2, 3];
    let config = ParallelConfig {
        num_workers: 0,
        ..ParallelConfig::default()
    };

    let err = run_partitioned(&items, &config, |_, chunk| Ok(chunk.to_vec())).unwrap_err();
    assert!(matches!(err, SymtabError::DegenerateWorkerCount { workers: 0 }));
}
