use crate::core::report::SetReport;
use crate::domain::model::Course;
use crate::domain::ports::ChallengeSet;
use crate::domain::sample::SampleData;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone, Weekday,
};

/// Classes run Monday to Friday, so a course ends on the Friday of its
/// final week. A Monday 2025-01-06 start with 4 weeks of classes ends on
/// Friday 2025-01-31.
pub fn course_end_date(start: NaiveDate, duration_weeks: u32) -> NaiveDate {
    let mut day = start + Duration::weeks(i64::from(duration_weeks));
    while day.weekday() != Weekday::Fri {
        day = day - Duration::days(1);
    }
    day
}

/// A 09:30 lesson of 45 minutes ends at 10:15. Wraps past midnight, which
/// is what late-evening workshops want.
pub fn lesson_end_time(start: NaiveTime, duration_minutes: u32) -> NaiveTime {
    start
        .overflowing_add_signed(Duration::minutes(i64::from(duration_minutes)))
        .0
}

/// Whole days a student has been enrolled as of `on`. Negative before the
/// enrollment date.
pub fn enrollment_age_days(enrolled_on: NaiveDate, on: NaiveDate) -> i64 {
    (on - enrolled_on).num_days()
}

/// Whether classes are in session on the given date.
pub fn is_course_running(course: &Course, on: NaiveDate) -> bool {
    on >= course.start_date && on <= course_end_date(course.start_date, course.duration_weeks)
}

/// Next weekday on or after the given date. A Friday deadline rolls to the
/// following Monday.
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut day = date + Duration::days(1);
    while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        day = day + Duration::days(1);
    }
    day
}

/// Installment plans bill on the last day of the month after enrollment:
/// enrolling 2025-01-15 makes the first installment due 2025-02-28.
pub fn first_installment_due(enrolled_on: NaiveDate) -> NaiveDate {
    let first_of_month = enrolled_on.with_day(1).unwrap_or(enrolled_on);
    first_of_month + Months::new(2) - Duration::days(1)
}

/// Certificates expire after a number of years. Month arithmetic clamps
/// the day, so a 2024-02-29 issue date expires 2025-02-28.
pub fn certificate_expiry(issued_on: NaiveDate, years: u32) -> NaiveDate {
    issued_on + Months::new(12 * years)
}

/// The dates of a weekly session series starting at `first`.
pub fn weekly_session_dates(first: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count)
        .map(|i| first + Duration::weeks(i as i64))
        .collect()
}

/// Two same-day time slots overlap when each starts before the other ends.
pub fn sessions_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// What a session looks like on the wall clock vs how long it actually
/// lasted. The two disagree whenever the UTC offset changes mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSpan {
    pub wall_clock_minutes: i64,
    pub elapsed_minutes: i64,
}

/// For a live session spanning the spring-forward transition (01:30 at
/// +01:00 through 03:30 at +02:00), the wall clock shows 120 minutes while
/// only 60 elapsed.
pub fn session_span(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> SessionSpan {
    SessionSpan {
        wall_clock_minutes: (end.naive_local() - start.naive_local()).num_minutes(),
        elapsed_minutes: (end - start).num_minutes(),
    }
}

pub struct DatesChallenges;

#[async_trait]
impl ChallengeSet for DatesChallenges {
    fn name(&self) -> &'static str {
        "dates"
    }

    fn summary(&self) -> &'static str {
        "calendar and clock arithmetic with chrono"
    }

    async fn run(&self, data: &SampleData) -> Result<SetReport> {
        let mut report = SetReport::new(self.name());

        if let Some(course) = data.courses.first() {
            let end = course_end_date(course.start_date, course.duration_weeks);
            report.push(
                format!("'{}' runs", course.title),
                format!("{} → {}", course.start_date, end),
            );
            report.push(
                "still running on end date",
                is_course_running(course, end),
            );
            report.push("next business day after end", next_business_day(end));

            if let Some(lesson) = course.lessons.first() {
                let start = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
                report.push(
                    format!("09:30 + {}min lesson ends", lesson.duration_minutes),
                    lesson_end_time(start, lesson.duration_minutes),
                );
            }
        }

        if let Some(enrollment) = data.enrollments.first() {
            report.push(
                "first installment due",
                first_installment_due(enrollment.enrolled_on),
            );
        }

        if let Some(cert) = data.certificates.first() {
            report.push(
                "certificate valid until",
                certificate_expiry(cert.issued_on, 2),
            );
        }

        // The classic spring-forward case: +01:00 becomes +02:00 at 02:00.
        let before = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 30, 1, 30, 0)
            .unwrap();
        let after = FixedOffset::east_opt(7200)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 30, 3, 30, 0)
            .unwrap();
        let span = session_span(before, after);
        report.push(
            "DST session wall clock vs elapsed",
            format!(
                "{}min on the wall, {}min elapsed",
                span.wall_clock_minutes, span.elapsed_minutes
            ),
        );

        Ok(report)
    }
}
