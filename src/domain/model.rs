use crate::utils::error::{CampError, Result};
use crate::utils::validation::{validate_email, validate_non_empty_string, validate_range};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl StudentLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            StudentLevel::Beginner => "Beginner",
            StudentLevel::Intermediate => "Intermediate",
            StudentLevel::Advanced => "Advanced",
            StudentLevel::Expert => "Expert",
        }
    }

    /// Next rung on the ladder, if any.
    pub fn next(&self) -> Option<StudentLevel> {
        match self {
            StudentLevel::Beginner => Some(StudentLevel::Intermediate),
            StudentLevel::Intermediate => Some(StudentLevel::Advanced),
            StudentLevel::Advanced => Some(StudentLevel::Expert),
            StudentLevel::Expert => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Programming,
    Design,
    Business,
    Marketing,
    DataScience,
    Languages,
}

impl Category {
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Programming => "Programming",
            Category::Design => "Design",
            Category::Business => "Business",
            Category::Marketing => "Marketing",
            Category::DataScience => "Data Science",
            Category::Languages => "Languages",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pending,
    Active,
    Completed,
    Dropped,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    Video,
    Reading,
    Quiz,
    Workshop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// Payment instruments carry their own data, which is what makes them the
/// centerpiece of the destructuring exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard { last_four: String, installments: u8 },
    Paypal { account_email: String },
    BankTransfer { reference: String },
    Voucher { code: String, covers_full_price: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub level: StudentLevel,
    pub joined_on: NaiveDate,
}

impl Student {
    /// Rejects blank names and malformed emails at construction; everything
    /// downstream can assume a well-formed student.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        email: impl Into<String>,
        level: StudentLevel,
        joined_on: NaiveDate,
    ) -> Result<Self> {
        let name = name.into();
        let email = email.into();
        validate_non_empty_string("student.name", &name)?;
        validate_email("student.email", &email)?;
        Ok(Self {
            id,
            name,
            email,
            level,
            joined_on,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    pub id: u32,
    pub name: String,
    pub specialty: Category,
    pub rating: f32,
    pub years_experience: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u32,
    pub title: String,
    pub lesson_type: LessonType,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub difficulty: DifficultyLevel,
    pub lessons: Vec<Lesson>,
    pub instructor_id: u32,
    pub start_date: NaiveDate,
    pub duration_weeks: u32,
}

impl Course {
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    pub fn total_duration_minutes(&self) -> u32 {
        self.lessons.iter().map(|l| l.duration_minutes).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: u32,
    pub student_id: u32,
    pub course_id: u32,
    pub enrolled_on: NaiveDate,
    pub status: EnrollmentStatus,
    /// Percent complete, always within `0..=100`.
    pub progress: u8,
    /// Final score, only present once graded.
    pub score: Option<u8>,
}

impl Enrollment {
    pub fn new(
        id: u32,
        student_id: u32,
        course_id: u32,
        enrolled_on: NaiveDate,
        status: EnrollmentStatus,
        progress: u8,
        score: Option<u8>,
    ) -> Result<Self> {
        validate_range("enrollment.progress", progress, 0, 100)?;
        if let Some(s) = score {
            validate_range("enrollment.score", s, 0, 100)?;
        }
        if score.is_some() && status != EnrollmentStatus::Completed {
            return Err(CampError::DataError {
                message: format!("enrollment {} has a score but is not completed", id),
            });
        }
        Ok(Self {
            id,
            student_id,
            course_id,
            enrolled_on,
            status,
            progress,
            score,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: u32,
    pub student_id: u32,
    pub course_id: u32,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: u32,
    pub student_id: u32,
    pub course_id: u32,
    pub issued_on: NaiveDate,
    pub final_score: u8,
}

impl Certificate {
    pub fn new(
        id: u32,
        student_id: u32,
        course_id: u32,
        issued_on: NaiveDate,
        final_score: u8,
    ) -> Result<Self> {
        validate_range("certificate.final_score", final_score, 0, 100)?;
        Ok(Self {
            id,
            student_id,
            course_id,
            issued_on,
            final_score,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub course_id: u32,
    pub student_id: u32,
    /// Stars, always within `1..=5`.
    pub rating: u8,
    pub comment: Option<String>,
}

impl Review {
    pub fn new(
        id: u32,
        course_id: u32,
        student_id: u32,
        rating: u8,
        comment: Option<String>,
    ) -> Result<Self> {
        validate_range("review.rating", rating, 1, 5)?;
        Ok(Self {
            id,
            course_id,
            student_id,
            rating,
            comment,
        })
    }
}
