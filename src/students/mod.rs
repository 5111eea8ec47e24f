pub mod validation;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::Student;
pub use validation::{validate_student, FieldErrors};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudentError {
    #[error("Student record is invalid")]
    Validation(FieldErrors),
    #[error("Student {0} was not found")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitOutcome {
    Added,
    Updated,
}

/// Список студентов, указатель на редактируемую запись и строка поиска.
#[derive(Debug, Clone, Default)]
pub struct StudentDirectory {
    students: Vec<Student>,
    selected: Option<String>,
    search_keyword: String,
}

impl StudentDirectory {
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            students,
            ..Self::default()
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn search_keyword(&self) -> &str {
        &self.search_keyword
    }

    /// Запись в режиме редактирования. При дубликатах ID берётся первая.
    pub fn selected(&self) -> Option<&Student> {
        let id = self.selected.as_deref()?;
        self.students.iter().find(|s| s.ma_sv == id)
    }

    /// Проверки на дубликат ID нет: запись просто добавляется в конец.
    pub fn add(&mut self, student: Student) -> Result<(), StudentError> {
        validate_student(&student).map_err(StudentError::Validation)?;
        debug!("Adding student {}", student.ma_sv);
        self.students.push(student);
        Ok(())
    }

    pub fn update(&mut self, student: Student) -> Result<(), StudentError> {
        validate_student(&student).map_err(StudentError::Validation)?;
        let mut matched = false;
        for existing in self.students.iter_mut().filter(|s| s.ma_sv == student.ma_sv) {
            *existing = student.clone();
            matched = true;
        }
        if !matched {
            return Err(StudentError::NotFound(student.ma_sv));
        }
        debug!("Updated student {}", student.ma_sv);
        Ok(())
    }

    pub fn delete(&mut self, ma_sv: &str) -> Result<(), StudentError> {
        let before = self.students.len();
        self.students.retain(|s| s.ma_sv != ma_sv);
        if self.students.len() == before {
            return Err(StudentError::NotFound(ma_sv.to_string()));
        }
        if self.selected.as_deref() == Some(ma_sv) {
            self.selected = None;
        }
        debug!("Deleted student {}", ma_sv);
        Ok(())
    }

    /// Включает режим редактирования и возвращает поля для формы.
    pub fn select(&mut self, ma_sv: &str) -> Result<Student, StudentError> {
        let student = self
            .students
            .iter()
            .find(|s| s.ma_sv == ma_sv)
            .cloned()
            .ok_or_else(|| StudentError::NotFound(ma_sv.to_string()))?;
        self.selected = Some(student.ma_sv.clone());
        Ok(student)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn search(&mut self, keyword: impl Into<String>) {
        self.search_keyword = keyword.into();
    }

    /// Текущая видимая выборка: подстрока без учёта регистра в ID, имени или email.
    pub fn visible(&self) -> Vec<&Student> {
        let keyword = self.search_keyword.to_lowercase();
        self.students
            .iter()
            .filter(|s| {
                keyword.is_empty()
                    || s.ma_sv.to_lowercase().contains(&keyword)
                    || s.ho_ten.to_lowercase().contains(&keyword)
                    || s.email.to_lowercase().contains(&keyword)
            })
            .collect()
    }

    /// Кнопка формы: обновление в режиме редактирования, иначе добавление.
    pub fn submit(&mut self, form: Student) -> Result<SubmitOutcome, StudentError> {
        if self.selected.is_some() {
            self.update(form)?;
            self.selected = None;
            Ok(SubmitOutcome::Updated)
        } else {
            self.add(form)?;
            Ok(SubmitOutcome::Added)
        }
    }
}
