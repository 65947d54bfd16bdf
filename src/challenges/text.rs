use crate::core::report::SetReport;
use crate::domain::model::Student;
use crate::domain::ports::ChallengeSet;
use crate::domain::sample::SampleData;
use crate::utils::error::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

fn non_alnum() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

/// URL slug for a course title: "Async Services from Scratch" becomes
/// "async-services-from-scratch".
pub fn course_slug(title: &str) -> String {
    non_alnum()
        .replace_all(&title.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Masks the local part of an email, keeping its first and last character:
/// "ana.lima@campmail.dev" becomes "a******a@campmail.dev". Short local
/// parts are masked entirely.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 2 => {
            let chars: Vec<char> = local.chars().collect();
            let stars = "*".repeat(chars.len() - 2);
            format!("{}{}{}@{}", chars[0], stars, chars[chars.len() - 1], domain)
        }
        Some((local, domain)) => format!("{}@{}", "*".repeat(local.chars().count()), domain),
        None => "*".repeat(email.chars().count()),
    }
}

/// Cuts a description to at most `max_chars` characters, appending an
/// ellipsis when something was dropped.
pub fn truncate_description(description: &str, max_chars: usize) -> String {
    let count = description.chars().count();
    if count <= max_chars {
        return description.to_string();
    }
    let kept: String = description.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// "$1,234.50"-style price formatting with a thousands separator.
pub fn format_price(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = cents / 100;
    let fraction = (cents % 100).abs();

    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if whole < 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Text progress bar: `progress_bar(40, 10)` renders "[####......] 40%".
pub fn progress_bar(progress: u8, width: usize) -> String {
    let progress = progress.min(100);
    let filled = (usize::from(progress) * width) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        progress
    )
}

/// Profile badge line: "🎓 Ana Lima · Advanced".
pub fn student_badge(student: &Student) -> String {
    format!("🎓 {} · {}", student.name, student.level.display_name())
}

/// Uppercase initials from the first and last word of a name.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next();
    let last = words.last();
    [first, last]
        .into_iter()
        .flatten()
        .filter_map(|w| w.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Printable certificate code: year, zero-padded student and course ids.
/// `certificate_code(2025, 123, 42)` is "RC-2025-000123-042".
pub fn certificate_code(year: i32, student_id: u32, course_id: u32) -> String {
    format!("RC-{}-{:06}-{:03}", year, student_id, course_id)
}

/// "1 lesson", "3 lessons".
pub fn pluralize_lessons(count: usize) -> String {
    if count == 1 {
        "1 lesson".to_string()
    } else {
        format!("{} lessons", count)
    }
}

pub struct TextChallenges;

#[async_trait]
impl ChallengeSet for TextChallenges {
    fn name(&self) -> &'static str {
        "text"
    }

    fn summary(&self) -> &'static str {
        "string formatting and light parsing"
    }

    async fn run(&self, data: &SampleData) -> Result<SetReport> {
        let mut report = SetReport::new(self.name());

        if let Some(course) = data.courses.first() {
            report.push("slug", course_slug(&course.title));
            report.push("teaser", truncate_description(&course.description, 24));
            report.push("price", format_price(course.price));
            report.push("lessons", pluralize_lessons(course.lesson_count()));
        }

        if let Some(student) = data.students.first() {
            report.push("badge", student_badge(student));
            report.push("masked email", mask_email(&student.email));
            report.push("initials", initials(&student.name));
        }

        if let Some(enrollment) = data.enrollments.first() {
            report.push("progress", progress_bar(enrollment.progress, 20));
        }

        if let Some(cert) = data.certificates.first() {
            use chrono::Datelike;
            report.push(
                "certificate code",
                certificate_code(cert.issued_on.year(), cert.student_id, cert.course_id),
            );
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::StudentLevel;
    use chrono::NaiveDate;

    #[test]
    fn test_course_slug() {
        assert_eq!(
            course_slug("Async Services from Scratch"),
            "async-services-from-scratch"
        );
        assert_eq!(course_slug("  C++ & Rust!  "), "c-rust");
        assert_eq!(course_slug("Typography that Works"), "typography-that-works");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ana.lima@campmail.dev"), "a******a@campmail.dev");
        assert_eq!(mask_email("ab@x.io"), "**@x.io");
        assert_eq!(mask_email("no-at-sign"), "**********");
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("short", 24), "short");
        assert_eq!(
            truncate_description("A hands-on course on practical ownership.", 16),
            "A hands-on cour…"
        );
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(49.99), "$49.99");
        assert_eq!(format_price(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_price(0.5), "$0.50");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(40, 10), "[####......] 40%");
        assert_eq!(progress_bar(0, 10), "[..........] 0%");
        assert_eq!(progress_bar(100, 10), "[##########] 100%");
        // Out-of-range input saturates rather than panicking.
        assert_eq!(progress_bar(130, 10), "[##########] 100%");
    }

    #[test]
    fn test_student_badge_and_initials() {
        let student = Student::new(
            1,
            "Ana Lima",
            "ana@campmail.dev",
            StudentLevel::Advanced,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap();
        assert_eq!(student_badge(&student), "🎓 Ana Lima · Advanced");
        assert_eq!(initials("Ana Lima"), "AL");
        assert_eq!(initials("Ana Maria de Souza"), "AS");
        assert_eq!(initials("Plato"), "P");
    }

    #[test]
    fn test_certificate_code() {
        assert_eq!(certificate_code(2025, 123, 42), "RC-2025-000123-042");
    }

    #[test]
    fn test_pluralize_lessons() {
        assert_eq!(pluralize_lessons(1), "1 lesson");
        assert_eq!(pluralize_lessons(3), "3 lessons");
        assert_eq!(pluralize_lessons(0), "0 lessons");
    }
}
