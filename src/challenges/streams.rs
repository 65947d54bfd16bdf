use crate::core::report::SetReport;
use crate::domain::model::{
    Category, Course, Enrollment, EnrollmentStatus, Instructor, LessonType, PaymentStatus, Student,
};
use crate::domain::ports::ChallengeSet;
use crate::domain::sample::SampleData;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Students ranked by their average completed-course score, best first.
/// Students with no graded enrollment are skipped.
pub fn top_students_by_average_score(data: &SampleData, n: usize) -> Vec<(String, f64)> {
    let mut averages: Vec<(String, f64)> = data
        .students
        .iter()
        .filter_map(|student| {
            let scores: Vec<u8> = data
                .enrollments
                .iter()
                .filter(|e| e.student_id == student.id)
                .filter_map(|e| e.score)
                .collect();
            if scores.is_empty() {
                None
            } else {
                let avg = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64;
                Some((student.name.clone(), avg))
            }
        })
        .collect();

    averages.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    averages.truncate(n);
    averages
}

/// Completed-payment revenue grouped by course category.
pub fn revenue_by_category(data: &SampleData) -> HashMap<Category, f64> {
    data.payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Completed)
        .filter_map(|p| data.course(p.course_id).map(|c| (c.category, p.amount)))
        .fold(HashMap::new(), |mut acc, (category, amount)| {
            *acc.entry(category).or_insert(0.0) += amount;
            acc
        })
}

/// Share of enrollments that reached `Completed`, in percent. Zero when
/// there are no enrollments at all.
pub fn completion_rate(enrollments: &[Enrollment]) -> f64 {
    if enrollments.is_empty() {
        return 0.0;
    }
    let completed = enrollments
        .iter()
        .filter(|e| e.status == EnrollmentStatus::Completed)
        .count();
    (completed as f64 / enrollments.len() as f64) * 100.0
}

/// The course with the best average review rating, with its average.
pub fn highest_rated_course<'a>(data: &'a SampleData) -> Option<(&'a Course, f64)> {
    data.courses
        .iter()
        .filter_map(|course| {
            let ratings: Vec<u8> = data
                .reviews
                .iter()
                .filter(|r| r.course_id == course.id)
                .map(|r| r.rating)
                .collect();
            if ratings.is_empty() {
                None
            } else {
                let avg =
                    ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64;
                Some((course, avg))
            }
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Total minutes of video content across the whole catalog.
pub fn total_video_minutes(courses: &[Course]) -> u32 {
    courses
        .iter()
        .flat_map(|c| c.lessons.iter())
        .filter(|l| l.lesson_type == LessonType::Video)
        .map(|l| l.duration_minutes)
        .sum()
}

/// Students with at least one active enrollment, in id order.
pub fn active_students<'a>(data: &'a SampleData) -> Vec<&'a Student> {
    data.students
        .iter()
        .filter(|s| {
            data.enrollments
                .iter()
                .any(|e| e.student_id == s.id && e.status == EnrollmentStatus::Active)
        })
        .collect()
}

/// Instructors ranked by the average rating of reviews on their courses.
pub fn instructor_leaderboard<'a>(data: &'a SampleData) -> Vec<(&'a Instructor, f64)> {
    let mut board: Vec<(&Instructor, f64)> = data
        .instructors
        .iter()
        .filter_map(|instructor| {
            let ratings: Vec<u8> = data
                .courses
                .iter()
                .filter(|c| c.instructor_id == instructor.id)
                .flat_map(|c| data.reviews.iter().filter(|r| r.course_id == c.id))
                .map(|r| r.rating)
                .collect();
            if ratings.is_empty() {
                None
            } else {
                let avg =
                    ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64;
                Some((instructor, avg))
            }
        })
        .collect();

    board.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.id.cmp(&b.0.id))
    });
    board
}

/// Splits enrollments into (finished, everything else).
pub fn partition_by_outcome(
    enrollments: &[Enrollment],
) -> (Vec<&Enrollment>, Vec<&Enrollment>) {
    enrollments
        .iter()
        .partition(|e| e.status == EnrollmentStatus::Completed)
}

/// Average catalog price per difficulty level.
pub fn average_price_by_difficulty(
    courses: &[Course],
) -> HashMap<crate::domain::model::DifficultyLevel, f64> {
    let mut sums: HashMap<crate::domain::model::DifficultyLevel, (f64, usize)> = HashMap::new();
    for course in courses {
        let entry = sums.entry(course.difficulty).or_insert((0.0, 0));
        entry.0 += course.price;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(difficulty, (total, count))| (difficulty, total / count as f64))
        .collect()
}

pub struct StreamsChallenges;

#[async_trait]
impl ChallengeSet for StreamsChallenges {
    fn name(&self) -> &'static str {
        "streams"
    }

    fn summary(&self) -> &'static str {
        "iterator pipelines over the sample dataset"
    }

    async fn run(&self, data: &SampleData) -> Result<SetReport> {
        let mut report = SetReport::new(self.name());

        for (name, avg) in top_students_by_average_score(data, 3) {
            report.push(format!("top student {}", name), format!("{:.1}", avg));
        }

        let revenue = revenue_by_category(data);
        let mut categories: Vec<_> = revenue.iter().collect();
        categories.sort_by(|a, b| {
            b.1.partial_cmp(a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.display_name().cmp(b.0.display_name()))
        });
        if let Some((category, total)) = categories.first() {
            report.push(
                format!("best-earning category ({})", category.display_name()),
                format!("${:.2}", total),
            );
        }

        report.push(
            "completion rate",
            format!("{:.1}%", completion_rate(&data.enrollments)),
        );
        report.push(
            "video content",
            format!("{} minutes", total_video_minutes(&data.courses)),
        );
        report.push("active students", active_students(data).len());

        if let Some((course, avg)) = highest_rated_course(data) {
            report.push(
                format!("highest rated: {}", course.title),
                format!("{:.2}★", avg),
            );
        }

        if let Some((instructor, avg)) = instructor_leaderboard(data).first() {
            report.push(
                format!("top instructor: {}", instructor.name),
                format!("{:.2}★", avg),
            );
        }

        let (finished, rest) = partition_by_outcome(&data.enrollments);
        report.push(
            "outcomes",
            format!("{} finished / {} in flight", finished.len(), rest.len()),
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        DifficultyLevel, Lesson, PaymentMethod, Review, StudentLevel,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn student(id: u32, name: &str, level: StudentLevel) -> Student {
        Student::new(
            id,
            name,
            format!("s{}@campmail.dev", id),
            level,
            date(2024, 1, 1),
        )
        .unwrap()
    }

    fn course(id: u32, category: Category, price: f64, difficulty: DifficultyLevel) -> Course {
        Course {
            id,
            title: format!("Course {}", id),
            description: String::new(),
            price,
            category,
            difficulty,
            lessons: vec![
                Lesson {
                    id: id * 10,
                    title: "Video intro".to_string(),
                    lesson_type: LessonType::Video,
                    duration_minutes: 30,
                },
                Lesson {
                    id: id * 10 + 1,
                    title: "Notes".to_string(),
                    lesson_type: LessonType::Reading,
                    duration_minutes: 15,
                },
            ],
            instructor_id: 1,
            start_date: date(2025, 1, 6),
            duration_weeks: 4,
        }
    }

    fn enrollment(
        id: u32,
        student_id: u32,
        course_id: u32,
        status: EnrollmentStatus,
        progress: u8,
        score: Option<u8>,
    ) -> Enrollment {
        Enrollment::new(id, student_id, course_id, date(2025, 1, 1), status, progress, score)
            .unwrap()
    }

    fn fixture() -> SampleData {
        let students = vec![
            student(1, "Ana Lima", StudentLevel::Advanced),
            student(2, "Bruno Silva", StudentLevel::Beginner),
            student(3, "Carla Novak", StudentLevel::Intermediate),
        ];
        let instructors = vec![
            Instructor {
                id: 1,
                name: "Elena Berg".to_string(),
                specialty: Category::Programming,
                rating: 4.5,
                years_experience: 10,
            },
            Instructor {
                id: 2,
                name: "Hugo Costa".to_string(),
                specialty: Category::Design,
                rating: 4.0,
                years_experience: 6,
            },
        ];
        let courses = vec![
            course(1, Category::Programming, 100.0, DifficultyLevel::Beginner),
            course(2, Category::Design, 50.0, DifficultyLevel::Advanced),
        ];
        let enrollments = vec![
            enrollment(1, 1, 1, EnrollmentStatus::Completed, 100, Some(90)),
            enrollment(2, 1, 2, EnrollmentStatus::Completed, 100, Some(80)),
            enrollment(3, 2, 1, EnrollmentStatus::Active, 40, None),
            enrollment(4, 3, 2, EnrollmentStatus::Dropped, 10, None),
        ];
        let payments = vec![
            crate::domain::model::Payment {
                id: 1,
                student_id: 1,
                course_id: 1,
                amount: 100.0,
                method: PaymentMethod::Paypal {
                    account_email: "s1@campmail.dev".to_string(),
                },
                status: PaymentStatus::Completed,
                paid_on: date(2025, 1, 1),
            },
            crate::domain::model::Payment {
                id: 2,
                student_id: 1,
                course_id: 2,
                amount: 50.0,
                method: PaymentMethod::BankTransfer {
                    reference: "TRF-1".to_string(),
                },
                status: PaymentStatus::Completed,
                paid_on: date(2025, 1, 2),
            },
            crate::domain::model::Payment {
                id: 3,
                student_id: 2,
                course_id: 1,
                amount: 100.0,
                method: PaymentMethod::Paypal {
                    account_email: "s2@campmail.dev".to_string(),
                },
                status: PaymentStatus::Refunded,
                paid_on: date(2025, 1, 3),
            },
        ];
        let reviews = vec![
            Review::new(1, 1, 1, 5, None).unwrap(),
            Review::new(2, 1, 2, 3, None).unwrap(),
            Review::new(3, 2, 1, 4, None).unwrap(),
        ];

        SampleData {
            students,
            instructors,
            courses,
            enrollments,
            payments,
            certificates: vec![],
            reviews,
        }
    }

    #[test]
    fn test_top_students_by_average_score() {
        let data = fixture();
        let top = top_students_by_average_score(&data, 5);
        // Only Ana has graded enrollments: (90 + 80) / 2.
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].0, "Ana Lima");
        assert!((top[0].1 - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_revenue_by_category_ignores_refunds() {
        let data = fixture();
        let revenue = revenue_by_category(&data);
        assert_eq!(revenue.get(&Category::Programming), Some(&100.0));
        assert_eq!(revenue.get(&Category::Design), Some(&50.0));
    }

    #[test]
    fn test_completion_rate() {
        let data = fixture();
        assert!((completion_rate(&data.enrollments) - 50.0).abs() < f64::EPSILON);
        assert_eq!(completion_rate(&[]), 0.0);
    }

    #[test]
    fn test_highest_rated_course() {
        let data = fixture();
        let (course, avg) = highest_rated_course(&data).unwrap();
        // Course 1 averages (5 + 3) / 2 = 4.0, course 2 has a single 4.
        // Tie goes to either; both average exactly 4.0 here.
        assert!((avg - 4.0).abs() < f64::EPSILON);
        assert!(course.id == 1 || course.id == 2);
    }

    #[test]
    fn test_total_video_minutes() {
        let data = fixture();
        // One 30-minute video lesson per course.
        assert_eq!(total_video_minutes(&data.courses), 60);
    }

    #[test]
    fn test_active_students() {
        let data = fixture();
        let active = active_students(&data);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Bruno Silva");
    }

    #[test]
    fn test_instructor_leaderboard() {
        let data = fixture();
        let board = instructor_leaderboard(&data);
        // Both courses belong to instructor 1 in the fixture.
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].0.id, 1);
        assert!((board[0].1 - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partition_by_outcome() {
        let data = fixture();
        let (finished, rest) = partition_by_outcome(&data.enrollments);
        assert_eq!(finished.len(), 2);
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn test_average_price_by_difficulty() {
        let data = fixture();
        let averages = average_price_by_difficulty(&data.courses);
        assert_eq!(averages.get(&DifficultyLevel::Beginner), Some(&100.0));
        assert_eq!(averages.get(&DifficultyLevel::Advanced), Some(&50.0));
    }
}
