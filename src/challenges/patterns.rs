use crate::core::report::SetReport;
use crate::domain::model::{
    Category, Course, DifficultyLevel, Enrollment, EnrollmentStatus, Lesson, LessonType, Payment,
    PaymentMethod, Review, Student,
};
use crate::domain::ports::ChallengeSet;
use crate::domain::sample::SampleData;
use crate::utils::error::Result;
use async_trait::async_trait;

/// One human line per payment instrument, pulling the variant data out by
/// destructuring.
pub fn describe_payment_method(method: &PaymentMethod) -> String {
    match method {
        PaymentMethod::CreditCard {
            last_four,
            installments: 1,
        } => format!("card ending {last_four}, paid upfront"),
        PaymentMethod::CreditCard {
            last_four,
            installments,
        } => format!("card ending {last_four}, {installments} installments"),
        PaymentMethod::Paypal { account_email } => format!("PayPal ({account_email})"),
        PaymentMethod::BankTransfer { reference } => format!("bank transfer {reference}"),
        PaymentMethod::Voucher {
            code,
            covers_full_price: true,
        } => format!("voucher {code} (fully covered)"),
        PaymentMethod::Voucher { code, .. } => format!("voucher {code} (partial)"),
    }
}

/// Ledger reference for a payment: nested struct-and-enum destructuring.
pub fn payment_reference(payment: &Payment) -> String {
    let Payment {
        id, method, amount, ..
    } = payment;
    match method {
        PaymentMethod::BankTransfer { reference } => reference.clone(),
        PaymentMethod::Voucher { code, .. } => format!("V/{code}"),
        _ => format!("P/{id:06}/{:.2}", amount),
    }
}

/// Marketing track for a (category, difficulty) pair, matched as a tuple.
pub fn track_name(pair: (Category, DifficultyLevel)) -> &'static str {
    match pair {
        (Category::Programming, DifficultyLevel::Beginner) => "First Steps in Code",
        (Category::Programming, _) => "Engineering Track",
        (Category::DataScience, DifficultyLevel::Advanced) => "Research Track",
        (Category::DataScience, _) => "Analytics Track",
        (Category::Design, _) => "Studio Track",
        (Category::Languages, DifficultyLevel::Beginner) => "Phrasebook Track",
        (Category::Languages, _) => "Fluency Track",
        (Category::Business | Category::Marketing, _) => "Growth Track",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    NoData,
    Single,
    Improving,
    Declining,
    Flat,
}

/// Trend over a chronological score slice, decided with slice patterns.
pub fn score_trend(scores: &[u8]) -> Trend {
    match scores {
        [] => Trend::NoData,
        [_] => Trend::Single,
        [first, .., last] if last > first => Trend::Improving,
        [first, .., last] if last < first => Trend::Declining,
        _ => Trend::Flat,
    }
}

/// One-line summary combining a destructured student with a guarded match
/// on the enrollment.
pub fn enrollment_summary(enrollment: &Enrollment, student: &Student) -> String {
    let Student { name, level, .. } = student;
    match enrollment {
        Enrollment {
            status: EnrollmentStatus::Completed,
            score: Some(s),
            ..
        } if *s >= 90 => format!("{name} ({}) finished with honors: {s}", level.display_name()),
        Enrollment {
            status: EnrollmentStatus::Completed,
            score: Some(s),
            ..
        } => format!("{name} finished with {s}"),
        Enrollment {
            status: EnrollmentStatus::Active,
            progress,
            ..
        } => format!("{name} is {progress}% through"),
        Enrollment { status, .. } => format!("{name} is {status:?}"),
    }
}

/// First video lesson of a course, if it has one.
pub fn first_video_lesson(course: &Course) -> Option<&Lesson> {
    course
        .lessons
        .iter()
        .find(|l| matches!(l.lesson_type, LessonType::Video))
}

/// The voucher code behind a payment method, when there is one.
pub fn voucher_code(method: &PaymentMethod) -> Option<&str> {
    if let PaymentMethod::Voucher { code, .. } = method {
        Some(code)
    } else {
        None
    }
}

/// Headline for a review card, matching rating and optional comment
/// together.
pub fn review_headline(review: &Review) -> String {
    match (review.rating, review.comment.as_deref()) {
        (5, Some(comment)) => format!("★★★★★ “{comment}”"),
        (5, None) => "★★★★★".to_string(),
        (rating, _) if rating <= 2 => format!("{rating}★ — needs attention"),
        (rating, Some(comment)) => format!("{rating}★ “{comment}”"),
        (rating, None) => format!("{rating}★"),
    }
}

pub struct PatternsChallenges;

#[async_trait]
impl ChallengeSet for PatternsChallenges {
    fn name(&self) -> &'static str {
        "patterns"
    }

    fn summary(&self) -> &'static str {
        "struct, enum, tuple and slice destructuring"
    }

    async fn run(&self, data: &SampleData) -> Result<SetReport> {
        let mut report = SetReport::new(self.name());

        if let Some(payment) = data.payments.first() {
            report.push("payment method", describe_payment_method(&payment.method));
            report.push("ledger reference", payment_reference(payment));
        }

        if let Some(course) = data.courses.first() {
            report.push(
                "track",
                track_name((course.category, course.difficulty)),
            );
            match first_video_lesson(course) {
                Some(lesson) => report.push("first video lesson", &lesson.title),
                None => report.push("first video lesson", "none"),
            }
        }

        if let Some(enrollment) = data.enrollments.first() {
            if let Some(student) = data.student(enrollment.student_id) {
                report.push("summary", enrollment_summary(enrollment, student));
            }
        }

        let completed_scores: Vec<u8> = data
            .enrollments
            .iter()
            .filter_map(|e| e.score)
            .take(5)
            .collect();
        report.push(
            format!("trend over {:?}", completed_scores),
            format!("{:?}", score_trend(&completed_scores)),
        );

        if let Some(review) = data.reviews.first() {
            report.push("review headline", review_headline(review));
        }

        Ok(report)
    }
}
