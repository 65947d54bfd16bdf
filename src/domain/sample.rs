use crate::domain::model::{
    Category, Certificate, Course, DifficultyLevel, Enrollment, EnrollmentStatus, Instructor,
    Lesson, LessonType, Payment, PaymentMethod, PaymentStatus, Review, Student, StudentLevel,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_range;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Daniel", "Elena", "Felix", "Grace", "Hugo", "Ines", "Jonas", "Katya",
    "Liam", "Marta", "Nadia", "Oscar", "Paula", "Quentin", "Rosa", "Stefan", "Tania",
];

const LAST_NAMES: &[&str] = &[
    "Lima", "Okafor", "Silva", "Novak", "Haddad", "Berg", "Costa", "Dubois", "Eriksen", "Fischer",
    "Garcia", "Horvat", "Ivanov", "Jensen", "Kovacs", "Larsen",
];

const COURSE_TOPICS: &[(&str, Category)] = &[
    ("Practical Ownership", Category::Programming),
    ("Async Services from Scratch", Category::Programming),
    ("Typography that Works", Category::Design),
    ("Interfaces for Humans", Category::Design),
    ("Pricing for Founders", Category::Business),
    ("Negotiation Field Guide", Category::Business),
    ("Campaigns on a Budget", Category::Marketing),
    ("Analytics without Tears", Category::DataScience),
    ("Forecasting Crash Course", Category::DataScience),
    ("Spanish for Travellers", Category::Languages),
    ("Business English Sprint", Category::Languages),
    ("Brand Voice Workshop", Category::Marketing),
];

const LESSON_VERBS: &[&str] = &["Exploring", "Applying", "Reviewing", "Practicing", "Debugging"];

/// How much data to generate. Defaults match a quick interactive run.
#[derive(Debug, Clone)]
pub struct SampleProfile {
    pub students: usize,
    pub courses: usize,
    pub seed: Option<u64>,
}

impl Default for SampleProfile {
    fn default() -> Self {
        Self {
            students: 40,
            courses: 12,
            seed: None,
        }
    }
}

/// The in-memory dataset every challenge set runs against. Generated once
/// per run and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub students: Vec<Student>,
    pub instructors: Vec<Instructor>,
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
    pub payments: Vec<Payment>,
    pub certificates: Vec<Certificate>,
    pub reviews: Vec<Review>,
}

impl SampleData {
    pub fn generate(profile: &SampleProfile) -> Result<Self> {
        validate_range("profile.students", profile.students, 1, 10_000)?;
        validate_range("profile.courses", profile.courses, 1, 1_000)?;

        let mut rng = match profile.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let instructors = gen_instructors(&mut rng);
        let courses = gen_courses(&mut rng, profile.courses, &instructors);
        let students = gen_students(&mut rng, profile.students)?;

        let mut enrollments = Vec::new();
        let mut payments = Vec::new();
        let mut certificates = Vec::new();
        let mut reviews = Vec::new();

        let mut enrollment_id = 1u32;
        let mut payment_id = 1u32;
        let mut certificate_id = 1u32;
        let mut review_id = 1u32;

        for student in &students {
            let count = rng.gen_range(1..=4usize).min(courses.len());
            let mut picked: Vec<&Course> = courses.choose_multiple(&mut rng, count).collect();
            picked.sort_by_key(|c| c.id);

            for course in picked {
                let status = pick_status(&mut rng);
                let progress = match status {
                    EnrollmentStatus::Pending => 0,
                    EnrollmentStatus::Completed => 100,
                    EnrollmentStatus::Dropped => rng.gen_range(0..60),
                    _ => rng.gen_range(1..100),
                };
                let score = match status {
                    EnrollmentStatus::Completed => Some(rng.gen_range(40..=100u8)),
                    _ => None,
                };
                let enrolled_on = course.start_date - Duration::days(rng.gen_range(1..45));

                let enrollment = Enrollment::new(
                    enrollment_id,
                    student.id,
                    course.id,
                    enrolled_on,
                    status,
                    progress,
                    score,
                )?;

                payments.push(Payment {
                    id: payment_id,
                    student_id: student.id,
                    course_id: course.id,
                    amount: course.price,
                    method: pick_method(&mut rng, student),
                    status: payment_status_for(status, &mut rng),
                    paid_on: enrolled_on,
                });
                payment_id += 1;

                if let Some(final_score) = score {
                    if final_score >= 60 {
                        certificates.push(Certificate::new(
                            certificate_id,
                            student.id,
                            course.id,
                            course.start_date + Duration::weeks(i64::from(course.duration_weeks)),
                            final_score,
                        )?);
                        certificate_id += 1;
                    }

                    if rng.gen_bool(0.6) {
                        let rating = rng.gen_range(1..=5u8);
                        let comment = if rating >= 4 {
                            Some("Would recommend".to_string())
                        } else if rating <= 2 {
                            Some("Expected more depth".to_string())
                        } else {
                            None
                        };
                        reviews.push(Review::new(
                            review_id,
                            course.id,
                            student.id,
                            rating,
                            comment,
                        )?);
                        review_id += 1;
                    }
                }

                enrollments.push(enrollment);
                enrollment_id += 1;
            }
        }

        Ok(Self {
            students,
            instructors,
            courses,
            enrollments,
            payments,
            certificates,
            reviews,
        })
    }

    pub fn student(&self, id: u32) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn course(&self, id: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn instructor(&self, id: u32) -> Option<&Instructor> {
        self.instructors.iter().find(|i| i.id == id)
    }

    pub fn enrollments_for_student(&self, student_id: u32) -> Vec<&Enrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .collect()
    }

    pub fn enrollments_for_course(&self, course_id: u32) -> Vec<&Enrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .collect()
    }
}

fn gen_instructors(rng: &mut StdRng) -> Vec<Instructor> {
    let specialties = [
        Category::Programming,
        Category::Design,
        Category::Business,
        Category::Marketing,
        Category::DataScience,
        Category::Languages,
    ];

    specialties
        .iter()
        .enumerate()
        .map(|(i, specialty)| Instructor {
            id: i as u32 + 1,
            name: format!(
                "{} {}",
                FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
                LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())]
            ),
            specialty: *specialty,
            rating: (rng.gen_range(30..=50) as f32) / 10.0,
            years_experience: rng.gen_range(2..=20),
        })
        .collect()
}

fn gen_courses(rng: &mut StdRng, count: usize, instructors: &[Instructor]) -> Vec<Course> {
    (0..count)
        .map(|i| {
            let (topic, category) = COURSE_TOPICS[i % COURSE_TOPICS.len()];
            let difficulty = match rng.gen_range(0..3) {
                0 => DifficultyLevel::Beginner,
                1 => DifficultyLevel::Intermediate,
                _ => DifficultyLevel::Advanced,
            };
            let instructor = instructors
                .iter()
                .find(|ins| ins.specialty == category)
                .or_else(|| instructors.first())
                .map(|ins| ins.id)
                .unwrap_or(1);

            // Courses all start on a Monday so the date katas have a stable shape.
            let start_date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
                + Duration::weeks(rng.gen_range(0..30));

            let lesson_count = rng.gen_range(4..=10usize);
            let lessons = (0..lesson_count)
                .map(|n| Lesson {
                    id: (i * 100 + n) as u32 + 1,
                    title: format!(
                        "{} {}, part {}",
                        LESSON_VERBS[n % LESSON_VERBS.len()],
                        topic,
                        n + 1
                    ),
                    lesson_type: match n % 4 {
                        0 => LessonType::Video,
                        1 => LessonType::Reading,
                        2 => LessonType::Quiz,
                        _ => LessonType::Workshop,
                    },
                    duration_minutes: rng.gen_range(10..=90),
                })
                .collect();

            Course {
                id: i as u32 + 1,
                title: topic.to_string(),
                description: format!("A hands-on course on {}.", topic.to_lowercase()),
                price: f64::from(rng.gen_range(19..=299)) + 0.99,
                category,
                difficulty,
                lessons,
                instructor_id: instructor,
                start_date,
                duration_weeks: rng.gen_range(2..=8),
            }
        })
        .collect()
}

fn gen_students(rng: &mut StdRng, count: usize) -> Result<Vec<Student>> {
    (0..count)
        .map(|i| {
            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            let id = i as u32 + 1;
            let level = match rng.gen_range(0..10) {
                0..=4 => StudentLevel::Beginner,
                5..=7 => StudentLevel::Intermediate,
                8 => StudentLevel::Advanced,
                _ => StudentLevel::Expert,
            };
            let joined_on = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + Duration::days(rng.gen_range(0..365));

            Student::new(
                id,
                format!("{} {}", first, last),
                format!(
                    "{}.{}{}@campmail.dev",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    id
                ),
                level,
                joined_on,
            )
        })
        .collect()
}

fn pick_status(rng: &mut StdRng) -> EnrollmentStatus {
    match rng.gen_range(0..10) {
        0 => EnrollmentStatus::Pending,
        1..=4 => EnrollmentStatus::Active,
        5..=7 => EnrollmentStatus::Completed,
        8 => EnrollmentStatus::Dropped,
        _ => EnrollmentStatus::Suspended,
    }
}

fn pick_method(rng: &mut StdRng, student: &Student) -> PaymentMethod {
    match rng.gen_range(0..4) {
        0 => PaymentMethod::CreditCard {
            last_four: format!("{:04}", rng.gen_range(0..10_000)),
            installments: rng.gen_range(1..=12),
        },
        1 => PaymentMethod::Paypal {
            account_email: student.email.clone(),
        },
        2 => PaymentMethod::BankTransfer {
            reference: format!("TRF-{:08}", rng.gen_range(0..100_000_000u32)),
        },
        _ => PaymentMethod::Voucher {
            code: format!("CAMP-{:05}", rng.gen_range(0..100_000)),
            covers_full_price: rng.gen_bool(0.3),
        },
    }
}

fn payment_status_for(status: EnrollmentStatus, rng: &mut StdRng) -> PaymentStatus {
    match status {
        EnrollmentStatus::Pending => PaymentStatus::Pending,
        EnrollmentStatus::Dropped => {
            if rng.gen_bool(0.5) {
                PaymentStatus::Refunded
            } else {
                PaymentStatus::Completed
            }
        }
        EnrollmentStatus::Suspended => {
            if rng.gen_bool(0.3) {
                PaymentStatus::Failed
            } else {
                PaymentStatus::Completed
            }
        }
        _ => PaymentStatus::Completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(students: usize, courses: usize) -> SampleData {
        SampleData::generate(&SampleProfile {
            students,
            courses,
            seed: Some(42),
        })
        .unwrap()
    }

    #[test]
    fn test_generate_respects_profile_counts() {
        let data = seeded(25, 8);
        assert_eq!(data.students.len(), 25);
        assert_eq!(data.courses.len(), 8);
        assert!(!data.enrollments.is_empty());
        assert!(!data.payments.is_empty());
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let a = seeded(10, 5);
        let b = seeded(10, 5);
        assert_eq!(a.students.len(), b.students.len());
        assert_eq!(a.enrollments.len(), b.enrollments.len());
        assert_eq!(a.students[0].name, b.students[0].name);
        assert_eq!(a.students[0].email, b.students[0].email);
    }

    #[test]
    fn test_generate_rejects_zero_students() {
        let result = SampleData::generate(&SampleProfile {
            students: 0,
            courses: 5,
            seed: Some(1),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_every_enrollment_has_a_payment() {
        let data = seeded(15, 6);
        assert_eq!(data.enrollments.len(), data.payments.len());
    }

    #[test]
    fn test_scores_only_on_completed_enrollments() {
        let data = seeded(30, 10);
        for enrollment in &data.enrollments {
            if enrollment.score.is_some() {
                assert_eq!(enrollment.status, EnrollmentStatus::Completed);
            }
            assert!(enrollment.progress <= 100);
        }
    }

    #[test]
    fn test_certificates_require_passing_score() {
        let data = seeded(30, 10);
        for cert in &data.certificates {
            assert!(cert.final_score >= 60);
        }
    }

    #[test]
    fn test_courses_start_on_monday() {
        use chrono::Datelike;
        let data = seeded(5, 12);
        for course in &data.courses {
            assert_eq!(course.start_date.weekday(), chrono::Weekday::Mon);
        }
    }

    #[test]
    fn test_lookups() {
        let data = seeded(10, 5);
        let first = &data.enrollments[0];
        assert!(data.student(first.student_id).is_some());
        assert!(data.course(first.course_id).is_some());
        assert!(!data.enrollments_for_student(first.student_id).is_empty());
        assert!(!data.enrollments_for_course(first.course_id).is_empty());
    }
}
