use crate::core::report::SetReport;
use crate::domain::model::{
    DifficultyLevel, EnrollmentStatus, PaymentMethod, StudentLevel,
};
use crate::domain::ports::ChallengeSet;
use crate::domain::sample::SampleData;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Refund policy as an ordered decision table; the first matching arm wins.
///
/// * `Pending` never started: full refund.
/// * `Active` under 10% progress: 90%; under 50%: 50%; otherwise 10%.
/// * `Suspended` keeps half.
/// * `Completed` and `Dropped` get nothing.
pub fn refund_percentage(status: EnrollmentStatus, progress: u8) -> u8 {
    match (status, progress) {
        (EnrollmentStatus::Pending, _) => 100,
        (EnrollmentStatus::Active, p) if p < 10 => 90,
        (EnrollmentStatus::Active, p) if p < 50 => 50,
        (EnrollmentStatus::Active, _) => 10,
        (EnrollmentStatus::Suspended, _) => 50,
        (EnrollmentStatus::Completed | EnrollmentStatus::Dropped, _) => 0,
    }
}

/// Loyalty discount in percent, by level with price guards.
pub fn loyalty_discount(level: StudentLevel, price: f64) -> u8 {
    match level {
        StudentLevel::Expert if price > 100.0 => 20,
        StudentLevel::Expert => 15,
        StudentLevel::Advanced => 10,
        StudentLevel::Intermediate if price > 50.0 => 5,
        _ => 0,
    }
}

/// A student moves up a level after enough completed courses with a strong
/// average. Experts have nowhere left to go.
pub fn promotion(level: StudentLevel, completed: usize, avg_score: f64) -> Option<StudentLevel> {
    match (level, completed) {
        (StudentLevel::Expert, _) => None,
        (_, c) if c >= 5 && avg_score >= 80.0 => level.next(),
        (StudentLevel::Beginner, c) if c >= 2 && avg_score >= 70.0 => level.next(),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
        }
    }
}

/// Manual-review banding for a payment, combining the instrument's own
/// data with amount guards.
pub fn payment_risk(method: &PaymentMethod, amount: f64) -> RiskBand {
    match method {
        PaymentMethod::Voucher { .. } => RiskBand::Low,
        PaymentMethod::CreditCard { installments, .. } if *installments > 6 && amount > 500.0 => {
            RiskBand::High
        }
        PaymentMethod::CreditCard { installments, .. } if *installments > 6 => RiskBand::Medium,
        PaymentMethod::BankTransfer { .. } if amount > 1_000.0 => RiskBand::Medium,
        PaymentMethod::Paypal { .. } if amount > 2_000.0 => RiskBand::Medium,
        _ => RiskBand::Low,
    }
}

/// Grade printed on a certificate.
pub fn certificate_grade(score: u8) -> &'static str {
    match score {
        90..=100 => "Distinction",
        75..=89 => "Merit",
        60..=74 => "Pass",
        _ => "Fail",
    }
}

/// Default difficulty a student should be steered towards.
pub fn recommended_difficulty(level: StudentLevel) -> DifficultyLevel {
    match level {
        StudentLevel::Beginner => DifficultyLevel::Beginner,
        StudentLevel::Intermediate => DifficultyLevel::Intermediate,
        StudentLevel::Advanced | StudentLevel::Expert => DifficultyLevel::Advanced,
    }
}

/// Support queue priority. Unrecognized combinations fall through to
/// "standard".
pub fn support_priority(
    status: EnrollmentStatus,
    progress: u8,
    payment_failed: bool,
) -> &'static str {
    match (status, progress, payment_failed) {
        (_, _, true) => "billing",
        (EnrollmentStatus::Suspended, _, _) => "urgent",
        (EnrollmentStatus::Active, p, _) if p >= 90 => "finishing",
        (EnrollmentStatus::Pending, _, _) => "onboarding",
        _ => "standard",
    }
}

pub struct RulesChallenges;

#[async_trait]
impl ChallengeSet for RulesChallenges {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn summary(&self) -> &'static str {
        "business rules as guarded match decision tables"
    }

    async fn run(&self, data: &SampleData) -> Result<SetReport> {
        let mut report = SetReport::new(self.name());

        if let Some(enrollment) = data.enrollments.first() {
            report.push(
                format!(
                    "refund for {:?} at {}% progress",
                    enrollment.status, enrollment.progress
                ),
                format!(
                    "{}%",
                    refund_percentage(enrollment.status, enrollment.progress)
                ),
            );
        }

        if let (Some(student), Some(course)) = (data.students.first(), data.courses.first()) {
            report.push(
                format!(
                    "{} discount on {}",
                    student.level.display_name(),
                    course.title
                ),
                format!("{}%", loyalty_discount(student.level, course.price)),
            );
            report.push(
                "recommended difficulty",
                format!("{:?}", recommended_difficulty(student.level)),
            );
        }

        if let Some(payment) = data.payments.first() {
            report.push(
                "payment risk",
                payment_risk(&payment.method, payment.amount).display_name(),
            );
        }

        if let Some(cert) = data.certificates.first() {
            report.push(
                format!("grade for score {}", cert.final_score),
                certificate_grade(cert.final_score),
            );
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_documented_examples() {
        // Active under 10% progress refunds 90%.
        assert_eq!(refund_percentage(EnrollmentStatus::Active, 5), 90);
        // Active under 50% refunds half.
        assert_eq!(refund_percentage(EnrollmentStatus::Active, 30), 50);
        assert_eq!(refund_percentage(EnrollmentStatus::Active, 80), 10);
        assert_eq!(refund_percentage(EnrollmentStatus::Pending, 0), 100);
        assert_eq!(refund_percentage(EnrollmentStatus::Suspended, 70), 50);
        assert_eq!(refund_percentage(EnrollmentStatus::Completed, 100), 0);
        assert_eq!(refund_percentage(EnrollmentStatus::Dropped, 20), 0);
    }

    #[test]
    fn test_refund_boundary_values() {
        assert_eq!(refund_percentage(EnrollmentStatus::Active, 9), 90);
        assert_eq!(refund_percentage(EnrollmentStatus::Active, 10), 50);
        assert_eq!(refund_percentage(EnrollmentStatus::Active, 49), 50);
        assert_eq!(refund_percentage(EnrollmentStatus::Active, 50), 10);
    }

    #[test]
    fn test_loyalty_discount_guards() {
        assert_eq!(loyalty_discount(StudentLevel::Expert, 150.0), 20);
        assert_eq!(loyalty_discount(StudentLevel::Expert, 80.0), 15);
        assert_eq!(loyalty_discount(StudentLevel::Advanced, 20.0), 10);
        assert_eq!(loyalty_discount(StudentLevel::Intermediate, 60.0), 5);
        assert_eq!(loyalty_discount(StudentLevel::Intermediate, 40.0), 0);
        assert_eq!(loyalty_discount(StudentLevel::Beginner, 300.0), 0);
    }

    #[test]
    fn test_promotion_rules() {
        assert_eq!(
            promotion(StudentLevel::Beginner, 2, 75.0),
            Some(StudentLevel::Intermediate)
        );
        assert_eq!(promotion(StudentLevel::Beginner, 1, 95.0), None);
        assert_eq!(
            promotion(StudentLevel::Intermediate, 5, 85.0),
            Some(StudentLevel::Advanced)
        );
        assert_eq!(promotion(StudentLevel::Intermediate, 5, 79.0), None);
        // Experts cannot be promoted no matter the record.
        assert_eq!(promotion(StudentLevel::Expert, 10, 100.0), None);
    }

    #[test]
    fn test_payment_risk_bands() {
        let card_long = PaymentMethod::CreditCard {
            last_four: "1234".to_string(),
            installments: 10,
        };
        assert_eq!(payment_risk(&card_long, 900.0), RiskBand::High);
        assert_eq!(payment_risk(&card_long, 200.0), RiskBand::Medium);

        let card_short = PaymentMethod::CreditCard {
            last_four: "1234".to_string(),
            installments: 2,
        };
        assert_eq!(payment_risk(&card_short, 900.0), RiskBand::Low);

        let transfer = PaymentMethod::BankTransfer {
            reference: "TRF-1".to_string(),
        };
        assert_eq!(payment_risk(&transfer, 1_500.0), RiskBand::Medium);
        assert_eq!(payment_risk(&transfer, 500.0), RiskBand::Low);

        let voucher = PaymentMethod::Voucher {
            code: "CAMP-1".to_string(),
            covers_full_price: true,
        };
        // Vouchers are prepaid, so the amount guard never applies.
        assert_eq!(payment_risk(&voucher, 10_000.0), RiskBand::Low);
    }

    #[test]
    fn test_certificate_grade_bands() {
        assert_eq!(certificate_grade(100), "Distinction");
        assert_eq!(certificate_grade(90), "Distinction");
        assert_eq!(certificate_grade(89), "Merit");
        assert_eq!(certificate_grade(75), "Merit");
        assert_eq!(certificate_grade(74), "Pass");
        assert_eq!(certificate_grade(60), "Pass");
        assert_eq!(certificate_grade(59), "Fail");
    }

    #[test]
    fn test_support_priority_order() {
        // Billing problems outrank everything else.
        assert_eq!(
            support_priority(EnrollmentStatus::Suspended, 95, true),
            "billing"
        );
        assert_eq!(
            support_priority(EnrollmentStatus::Suspended, 10, false),
            "urgent"
        );
        assert_eq!(
            support_priority(EnrollmentStatus::Active, 95, false),
            "finishing"
        );
        assert_eq!(
            support_priority(EnrollmentStatus::Pending, 0, false),
            "onboarding"
        );
        assert_eq!(
            support_priority(EnrollmentStatus::Active, 40, false),
            "standard"
        );
    }
}
