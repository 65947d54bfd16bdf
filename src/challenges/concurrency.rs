use crate::core::report::SetReport;
use crate::domain::model::{EnrollmentStatus, Payment, PaymentStatus};
use crate::domain::ports::ChallengeSet;
use crate::domain::sample::SampleData;
use crate::utils::error::Result;
use async_trait::async_trait;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Two independent aggregations composed with `try_join!`, the future
/// equivalent of running both halves of the work at once and meeting at
/// the end.
pub async fn enrollment_and_revenue(data: &SampleData) -> Result<(usize, f64)> {
    let enrollments = data.enrollments.clone();
    let payments = data.payments.clone();

    let count_active = tokio::spawn(async move {
        enrollments
            .iter()
            .filter(|e| e.status == EnrollmentStatus::Active)
            .count()
    });
    let sum_revenue = tokio::spawn(async move {
        payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Completed)
            .map(|p| p.amount)
            .sum::<f64>()
    });

    let (active, revenue) = tokio::try_join!(count_active, sum_revenue)?;
    Ok((active, revenue))
}

/// One lightweight task per student, the task-per-item style that maps to
/// the original's thread-per-request demos. Results come back in spawn
/// order.
pub async fn welcome_messages(data: &SampleData) -> Result<Vec<String>> {
    let mut set = JoinSet::new();

    for student in &data.students {
        let name = student.name.clone();
        let level = student.level;
        set.spawn(async move { format!("Welcome back, {} ({})", name, level.display_name()) });
    }

    let mut messages = Vec::with_capacity(data.students.len());
    while let Some(joined) = set.join_next().await {
        messages.push(joined?);
    }
    messages.sort();
    Ok(messages)
}

/// Sequential baseline for the aggregation the parallel version races.
pub fn sequential_revenue(payments: &[Payment]) -> f64 {
    payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Completed)
        .map(|p| p.amount)
        .sum()
}

/// The same aggregation on a rayon parallel iterator.
pub fn parallel_revenue(payments: &[Payment]) -> f64 {
    payments
        .par_iter()
        .filter(|p| p.status == PaymentStatus::Completed)
        .map(|p| p.amount)
        .sum()
}

#[derive(Debug, Clone, Copy)]
pub struct TimedComparison {
    pub sequential_micros: u128,
    pub parallel_micros: u128,
    pub sequential_total: f64,
    pub parallel_total: f64,
}

/// Times the sequential and parallel aggregations over the same input.
/// On a dataset this small the parallel run often loses; that is part of
/// the lesson.
pub fn compare_revenue_aggregation(payments: &[Payment]) -> TimedComparison {
    let started = Instant::now();
    let sequential_total = sequential_revenue(payments);
    let sequential_micros = started.elapsed().as_micros();

    let started = Instant::now();
    let parallel_total = parallel_revenue(payments);
    let parallel_micros = started.elapsed().as_micros();

    TimedComparison {
        sequential_micros,
        parallel_micros,
        sequential_total,
        parallel_total,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LostUpdateOutcome {
    pub expected: u64,
    pub racy_count: u64,
    pub atomic_count: u64,
}

/// The cautionary tale: incrementing a shared counter with separate load
/// and store operations loses updates under interleaving, while
/// `fetch_add` never does. The yield between load and store makes the
/// interleaving all but certain.
pub async fn lost_update_demo(workers: u64, increments: u64) -> Result<LostUpdateOutcome> {
    let racy = Arc::new(AtomicU64::new(0));
    let atomic = Arc::new(AtomicU64::new(0));

    let mut set = JoinSet::new();
    for _ in 0..workers {
        let racy = Arc::clone(&racy);
        let atomic = Arc::clone(&atomic);
        set.spawn(async move {
            for _ in 0..increments {
                // Read-modify-write in two steps: the classic lost update.
                let seen = racy.load(Ordering::Relaxed);
                tokio::task::yield_now().await;
                racy.store(seen + 1, Ordering::Relaxed);

                atomic.fetch_add(1, Ordering::Relaxed);
            }
        });
    }

    while let Some(joined) = set.join_next().await {
        joined?;
    }

    Ok(LostUpdateOutcome {
        expected: workers * increments,
        racy_count: racy.load(Ordering::Relaxed),
        atomic_count: atomic.load(Ordering::Relaxed),
    })
}

pub struct ConcurrencyChallenges;

#[async_trait]
impl ChallengeSet for ConcurrencyChallenges {
    fn name(&self) -> &'static str {
        "concurrency"
    }

    fn summary(&self) -> &'static str {
        "future composition, task-per-item, rayon, and one cautionary race"
    }

    async fn run(&self, data: &SampleData) -> Result<SetReport> {
        let mut report = SetReport::new(self.name());

        let (active, revenue) = enrollment_and_revenue(data).await?;
        report.push(
            "joined aggregations",
            format!("{} active enrollments, ${:.2} settled", active, revenue),
        );

        let messages = welcome_messages(data).await?;
        report.push(
            format!("one task per student ({})", messages.len()),
            messages.first().cloned().unwrap_or_else(|| "none".to_string()),
        );

        let timing = compare_revenue_aggregation(&data.payments);
        report.push(
            "sequential vs rayon",
            format!(
                "{}µs vs {}µs for ${:.2}",
                timing.sequential_micros, timing.parallel_micros, timing.parallel_total
            ),
        );

        let outcome = lost_update_demo(8, 200).await?;
        report.push(
            "lost-update demo",
            format!(
                "expected {}, racy load/store saw {}, fetch_add saw {}",
                outcome.expected, outcome.racy_count, outcome.atomic_count
            ),
        );

        Ok(report)
    }
}
