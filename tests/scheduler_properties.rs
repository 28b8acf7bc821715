// tests/scheduler_properties.rs

use std::error::Error;

use duedag::dag::{ScheduleOptions, Scheduler, TaskDescriptor, UnresolvedReason, schedule};
use duedag::types::{MissingDependencies, Strategy};
use duedag_test_utils::builders::task;
use duedag_test_utils::{day, init_tracing, today};

type TestResult = Result<(), Box<dyn Error>>;

fn relaxation() -> ScheduleOptions {
    ScheduleOptions::default()
}

fn topological() -> ScheduleOptions {
    ScheduleOptions {
        strategy: Strategy::Topological,
        ..ScheduleOptions::default()
    }
}

#[test]
fn empty_input_gives_empty_output() -> TestResult {
    init_tracing();

    for options in [relaxation(), topological()] {
        let report = schedule(&[], today(), &options)?;
        assert!(report.tasks.is_empty());
        assert!(report.unresolved.is_empty());
    }
    Ok(())
}

#[test]
fn root_task_due_after_ceil_of_effort_over_hours_per_day() -> TestResult {
    init_tracing();

    let report = Scheduler::default().schedule(&[task("a", 8.0, &[])], today())?;
    assert_eq!(report.due_date_of("a"), Some(day(2)));
    Ok(())
}

#[test]
fn missing_effort_defaults_to_four_hours() -> TestResult {
    init_tracing();

    let tasks = vec![TaskDescriptor::new("a")];
    let report = Scheduler::default().schedule(&tasks, today())?;
    assert_eq!(report.due_date_of("a"), Some(day(1)));

    // With 3h days the 4h default spans two days.
    let options = ScheduleOptions {
        hours_per_day: 3.0,
        ..ScheduleOptions::default()
    };
    let report = schedule(&tasks, today(), &options)?;
    assert_eq!(report.due_date_of("a"), Some(day(2)));
    Ok(())
}

#[test]
fn dependent_adds_its_own_duration_to_dependency() -> TestResult {
    init_tracing();

    let tasks = vec![task("a", 6.0, &[]), task("b", 12.0, &["a"])];

    for options in [relaxation(), topological()] {
        let report = schedule(&tasks, today(), &options)?;
        assert_eq!(report.due_date_of("a"), Some(day(1)));
        assert_eq!(report.due_date_of("b"), Some(day(3)));
    }
    Ok(())
}

#[test]
fn diamond_takes_latest_branch() -> TestResult {
    init_tracing();

    let tasks = vec![
        task("d", 6.0, &["b", "c"]),
        task("b", 6.0, &["a"]),
        task("c", 6.0, &["a"]),
        task("a", 6.0, &[]),
    ];

    for options in [relaxation(), topological()] {
        let report = schedule(&tasks, today(), &options)?;
        assert_eq!(report.due_date_of("a"), Some(day(1)));
        assert_eq!(report.due_date_of("b"), Some(day(2)));
        assert_eq!(report.due_date_of("c"), Some(day(2)));
        assert_eq!(report.due_date_of("d"), Some(day(3)));
        assert!(report.is_fully_scheduled());
    }
    Ok(())
}

#[test]
fn uneven_diamond_waits_for_slowest_dependency() -> TestResult {
    init_tracing();

    let tasks = vec![
        task("a", 6.0, &[]),
        task("fast", 1.0, &["a"]),
        task("slow", 18.0, &["a"]),
        task("join", 0.0, &["fast", "slow"]),
    ];
    let report = Scheduler::default().schedule(&tasks, today())?;

    assert_eq!(report.due_date_of("fast"), Some(day(2)));
    assert_eq!(report.due_date_of("slow"), Some(day(4)));
    // Zero effort: same day as the latest dependency.
    assert_eq!(report.due_date_of("join"), Some(day(4)));
    Ok(())
}

#[test]
fn two_cycle_stays_unscheduled_and_terminates() -> TestResult {
    init_tracing();

    let tasks = vec![task("x", 6.0, &["y"]), task("y", 6.0, &["x"])];

    let report = schedule(&tasks, today(), &relaxation())?;
    assert_eq!(report.due_date_of("x"), None);
    assert_eq!(report.due_date_of("y"), None);
    assert!(report.rounds <= 10);

    let cycle = UnresolvedReason::Cycle {
        members: vec!["x".to_string(), "y".to_string()],
    };
    assert_eq!(report.unresolved_reason_of("x"), Some(&cycle));
    assert_eq!(report.unresolved_reason_of("y"), Some(&cycle));

    let report = schedule(&tasks, today(), &topological())?;
    assert_eq!(report.unresolved.len(), 2);
    Ok(())
}

#[test]
fn tasks_downstream_of_a_cycle_are_blocked() -> TestResult {
    init_tracing();

    let tasks = vec![
        task("x", 6.0, &["y"]),
        task("y", 6.0, &["x"]),
        task("after", 6.0, &["x", "free"]),
        task("free", 6.0, &[]),
    ];

    for options in [relaxation(), topological()] {
        let report = schedule(&tasks, today(), &options)?;
        assert_eq!(report.due_date_of("free"), Some(day(1)));
        assert_eq!(
            report.unresolved_reason_of("after"),
            Some(&UnresolvedReason::BlockedBy {
                ids: vec!["x".to_string()]
            })
        );
    }
    Ok(())
}

#[test]
fn preset_due_date_is_kept_even_with_dependencies() -> TestResult {
    init_tracing();

    let pinned = day(1);
    let tasks = vec![
        task("slow", 60.0, &[]),
        task("pinned", 6.0, &["slow"]).with_due_date(pinned),
        task("next", 6.0, &["pinned"]),
    ];

    for options in [relaxation(), topological()] {
        let report = schedule(&tasks, today(), &options)?;
        assert_eq!(report.due_date_of("slow"), Some(day(10)));
        assert_eq!(report.due_date_of("pinned"), Some(pinned));
        // Dependents build on the pinned date, not on `slow`.
        assert_eq!(report.due_date_of("next"), Some(day(2)));
    }
    Ok(())
}

#[test]
fn preset_due_date_on_root_is_kept() -> TestResult {
    init_tracing();

    let tasks = vec![task("root", 60.0, &[]).with_due_date(day(1))];
    let report = Scheduler::default().schedule(&tasks, today())?;
    assert_eq!(report.due_date_of("root"), Some(day(1)));
    Ok(())
}

#[test]
fn rescheduling_the_output_is_a_no_op() -> TestResult {
    init_tracing();

    let tasks = vec![
        task("a", 6.0, &[]),
        task("b", 7.0, &["a"]),
        task("c", 13.0, &["a", "b"]),
    ];

    for options in [relaxation(), topological()] {
        let first = schedule(&tasks, today(), &options)?;
        let second = schedule(&first.tasks, today(), &options)?;
        assert_eq!(second.tasks, first.tasks);

        // Even on a later day nothing moves.
        let third = schedule(&first.tasks, day(30), &options)?;
        assert_eq!(third.tasks, first.tasks);
    }
    Ok(())
}

#[test]
fn zero_effort_root_is_due_today() -> TestResult {
    init_tracing();

    let report = Scheduler::default().schedule(&[task("now", 0.0, &[])], today())?;
    assert_eq!(report.due_date_of("now"), Some(today()));
    Ok(())
}

#[test]
fn invalid_effort_is_clamped_to_zero_days() -> TestResult {
    init_tracing();

    let tasks = vec![
        task("negative", -12.0, &[]),
        task("nan", f64::NAN, &["negative"]),
    ];
    let report = Scheduler::default().schedule(&tasks, today())?;
    assert_eq!(report.due_date_of("negative"), Some(today()));
    assert_eq!(report.due_date_of("nan"), Some(today()));
    Ok(())
}

#[test]
fn missing_dependency_blocks_by_default() -> TestResult {
    init_tracing();

    let tasks = vec![
        task("a", 6.0, &[]),
        task("b", 6.0, &["a", "ghost"]),
        task("c", 6.0, &["b"]),
    ];

    for options in [relaxation(), topological()] {
        let report = schedule(&tasks, today(), &options)?;
        assert_eq!(report.due_date_of("a"), Some(day(1)));
        assert_eq!(report.due_date_of("b"), None);
        assert_eq!(
            report.unresolved_reason_of("b"),
            Some(&UnresolvedReason::MissingDependencies {
                ids: vec!["ghost".to_string()]
            })
        );
        assert_eq!(
            report.unresolved_reason_of("c"),
            Some(&UnresolvedReason::BlockedBy {
                ids: vec!["b".to_string()]
            })
        );
    }
    Ok(())
}

#[test]
fn missing_dependency_is_satisfied_under_ignore_policy() -> TestResult {
    init_tracing();

    let tasks = vec![
        task("a", 6.0, &[]),
        task("b", 6.0, &["a", "ghost"]),
        task("orphan", 12.0, &["ghost"]),
    ];

    for strategy in [Strategy::Relaxation, Strategy::Topological] {
        let options = ScheduleOptions {
            strategy,
            missing_dependencies: MissingDependencies::Ignore,
            ..ScheduleOptions::default()
        };
        let report = schedule(&tasks, today(), &options)?;
        assert_eq!(report.due_date_of("b"), Some(day(2)));
        // Only unknown dependencies: scheduled like a root.
        assert_eq!(report.due_date_of("orphan"), Some(day(2)));
        assert!(report.is_fully_scheduled());
    }
    Ok(())
}

/// `t12 -> t11 -> ... -> t0`, listed dependents first.
fn reversed_chain(len: usize) -> Vec<TaskDescriptor> {
    (0..len)
        .rev()
        .map(|i| {
            let id = format!("t{i}");
            if i == 0 {
                task(&id, 6.0, &[])
            } else {
                let dep = format!("t{}", i - 1);
                task(&id, 6.0, &[dep.as_str()])
            }
        })
        .collect()
}

#[test]
fn relaxation_round_budget_cuts_deep_reversed_chains() -> TestResult {
    init_tracing();

    let tasks = reversed_chain(13);
    let report = schedule(&tasks, today(), &relaxation())?;

    assert_eq!(report.rounds, 10);
    assert_eq!(report.due_date_of("t10"), Some(day(11)));
    assert_eq!(report.due_date_of("t11"), None);
    assert_eq!(
        report.unresolved_reason_of("t11"),
        Some(&UnresolvedReason::RoundLimit)
    );
    assert_eq!(
        report.unresolved_reason_of("t12"),
        Some(&UnresolvedReason::BlockedBy {
            ids: vec!["t11".to_string()]
        })
    );
    Ok(())
}

#[test]
fn raising_max_rounds_or_going_topological_finishes_the_chain() -> TestResult {
    init_tracing();

    let tasks = reversed_chain(13);

    let more_rounds = ScheduleOptions {
        max_rounds: 20,
        ..ScheduleOptions::default()
    };
    for options in [more_rounds, topological()] {
        let report = schedule(&tasks, today(), &options)?;
        assert!(report.is_fully_scheduled());
        assert_eq!(report.due_date_of("t12"), Some(day(13)));
    }
    Ok(())
}

#[test]
fn chain_in_dependency_order_resolves_in_first_round() -> TestResult {
    init_tracing();

    let mut tasks = reversed_chain(30);
    tasks.reverse();

    let report = schedule(&tasks, today(), &relaxation())?;
    assert!(report.is_fully_scheduled());
    assert_eq!(report.due_date_of("t29"), Some(day(30)));
    // One resolving round plus the empty round that ends the loop.
    assert_eq!(report.rounds, 2);
    Ok(())
}

#[test]
fn output_preserves_input_order_and_fields() -> TestResult {
    init_tracing();

    let tasks = vec![
        task("z", 6.0, &["ghost"]),
        task("m", 3.0, &[]),
        TaskDescriptor::new("a").depends_on("m"),
    ];
    let report = Scheduler::default().schedule(&tasks, today())?;

    let ids: Vec<&str> = report.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "m", "a"]);
    for (input, output) in tasks.iter().zip(&report.tasks) {
        assert_eq!(input.dependency_ids, output.dependency_ids);
        assert_eq!(input.effort_hours.map(f64::to_bits), output.effort_hours.map(f64::to_bits));
    }
    Ok(())
}

#[test]
fn summary_counts_overdue_and_completion() -> TestResult {
    init_tracing();

    let past = today().pred_opt().ok_or("date underflow")?;
    let tasks = vec![
        task("late", 6.0, &[]).with_due_date(past),
        task("a", 6.0, &[]),
        task("b", 12.0, &["a"]),
        task("stuck", 6.0, &["ghost"]),
    ];
    let report = Scheduler::default().schedule(&tasks, today())?;
    let summary = report.summary(today());

    assert_eq!(summary.total, 4);
    assert_eq!(summary.scheduled, 3);
    assert_eq!(summary.unresolved, 1);
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.completion_date, Some(day(3)));
    Ok(())
}

#[test]
fn scheduler_is_shareable_across_threads() -> TestResult {
    init_tracing();

    let scheduler = Scheduler::default();
    let tasks = vec![task("a", 6.0, &[]), task("b", 6.0, &["a"])];

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| scheduler.schedule(&tasks, today())))
            .collect();
        for handle in handles {
            let report = handle.join().expect("thread panicked").expect("schedule failed");
            assert_eq!(report.due_date_of("b"), Some(day(2)));
        }
    });
    Ok(())
}
