//! Matrix builder: dense specialty × subject grid for one course
//!
//! The matrix always spans the full cross product of the reference catalogs,
//! so every (specialty, subject) pair has a cell even when no relationship
//! exists for it. Relation counts are computed during the build and are never
//! patched afterwards; a changed input means a fresh build.

use crate::{CourseId, Relationship, Specialty, SpecialtyId, Subject, SubjectId};
use std::collections::HashMap;

/// One matrix cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// No relationship links this specialty and subject for the course
    #[default]
    Empty,
    /// The relationship linking this specialty and subject
    Linked(Relationship),
}

impl Cell {
    /// True for the empty marker
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The linked relationship, if any
    pub fn relationship(&self) -> Option<&Relationship> {
        match self {
            Cell::Empty => None,
            Cell::Linked(rel) => Some(rel),
        }
    }
}

/// Matrix axis, used when querying relation counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Columns: count of linked specialties per subject
    Subject,
    /// Rows: count of linked subjects per specialty
    Specialty,
}

/// Dense relationship grid for a single course
///
/// Rows are specialties and columns are subjects, both in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    course_id: CourseId,
    specialties: Vec<Specialty>,
    subjects: Vec<Subject>,
    // Row-major: cells[row * subjects.len() + col]
    cells: Vec<Cell>,
    specialty_counts: Vec<usize>,
    subject_counts: Vec<usize>,
    specialty_index: HashMap<SpecialtyId, usize>,
    subject_index: HashMap<SubjectId, usize>,
}

/// Build the matrix for `course_id`
///
/// `subjects` and `specialties` must be the complete catalogs. `relationships`
/// may span every course; only those for `course_id` whose subject and
/// specialty both exist in the catalogs land in the grid. Relationships
/// pointing at unknown catalog entries are skipped.
///
/// # Examples
///
/// ```
/// use syllabus_domain::{build_matrix, Relationship, Specialty, Subject};
///
/// let subjects = vec![
///     Subject::new("math", "Math", 4.0, 60.0),
///     Subject::new("phys", "Physics", 3.0, 60.0),
/// ];
/// let specialties = vec![
///     Specialty::new("cardio", "Cardiology"),
///     Specialty::new("neuro", "Neurology"),
/// ];
/// let relationships = vec![Relationship::new("r1", "c1", "math", "cardio", None)];
///
/// let matrix = build_matrix(&relationships, &subjects, &specialties, &"c1".into());
/// assert_eq!(matrix.cell_count(), 4);
/// assert_eq!(matrix.filled_count(), 1);
/// ```
pub fn build_matrix(
    relationships: &[Relationship],
    subjects: &[Subject],
    specialties: &[Specialty],
    course_id: &CourseId,
) -> Matrix {
    let mut specialty_index = HashMap::with_capacity(specialties.len());
    let mut rows = Vec::with_capacity(specialties.len());
    for specialty in specialties {
        if !specialty_index.contains_key(&specialty.id) {
            specialty_index.insert(specialty.id.clone(), rows.len());
            rows.push(specialty.clone());
        }
    }

    let mut subject_index = HashMap::with_capacity(subjects.len());
    let mut cols = Vec::with_capacity(subjects.len());
    for subject in subjects {
        if !subject_index.contains_key(&subject.id) {
            subject_index.insert(subject.id.clone(), cols.len());
            cols.push(subject.clone());
        }
    }

    let width = cols.len();
    let mut cells = vec![Cell::Empty; rows.len() * width];
    let mut specialty_counts = vec![0usize; rows.len()];
    let mut subject_counts = vec![0usize; width];

    for rel in relationships.iter().filter(|r| &r.course_id == course_id) {
        let (Some(&row), Some(&col)) = (
            specialty_index.get(&rel.specialty_id),
            subject_index.get(&rel.subject_id),
        ) else {
            continue;
        };

        let cell = &mut cells[row * width + col];
        // First record wins if the feed ever carries the same triple twice.
        if cell.is_empty() {
            *cell = Cell::Linked(rel.clone());
            specialty_counts[row] += 1;
            subject_counts[col] += 1;
        }
    }

    Matrix {
        course_id: course_id.clone(),
        specialties: rows,
        subjects: cols,
        cells,
        specialty_counts,
        subject_counts,
        specialty_index,
        subject_index,
    }
}

impl Matrix {
    /// Course this matrix was built for
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    /// Row entities in row order
    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    /// Column entities in column order
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// (rows, columns)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.specialties.len(), self.subjects.len())
    }

    /// Total number of cells, empty or not
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells holding a relationship
    pub fn filled_count(&self) -> usize {
        self.specialty_counts.iter().sum()
    }

    /// True when no cell holds a relationship
    pub fn has_no_relationships(&self) -> bool {
        self.filled_count() == 0
    }

    /// Cell at the given specialty and subject, `None` if either is unknown
    pub fn cell(&self, specialty: &SpecialtyId, subject: &SubjectId) -> Option<&Cell> {
        let row = *self.specialty_index.get(specialty)?;
        let col = *self.subject_index.get(subject)?;
        self.cell_at(row, col)
    }

    /// Cell by position
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.specialties.len() || col >= self.subjects.len() {
            return None;
        }
        self.cells.get(row * self.subjects.len() + col)
    }

    /// All cells of a specialty row, in column order
    pub fn row(&self, specialty: &SpecialtyId) -> Option<&[Cell]> {
        let row = *self.specialty_index.get(specialty)?;
        let width = self.subjects.len();
        Some(&self.cells[row * width..(row + 1) * width])
    }

    /// All cells of a subject column, in row order
    pub fn column(&self, subject: &SubjectId) -> Option<impl Iterator<Item = &Cell> + '_> {
        let col = *self.subject_index.get(subject)?;
        let width = self.subjects.len();
        Some(self.cells.iter().skip(col).step_by(width.max(1)))
    }

    /// Every relationship placed in the grid, row-major
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> + '_ {
        self.cells.iter().filter_map(Cell::relationship)
    }

    /// Relation count of a subject column
    pub fn subject_count(&self, subject: &SubjectId) -> Option<usize> {
        self.subject_index
            .get(subject)
            .map(|&col| self.subject_counts[col])
    }

    /// Relation count of a specialty row
    pub fn specialty_count(&self, specialty: &SpecialtyId) -> Option<usize> {
        self.specialty_index
            .get(specialty)
            .map(|&row| self.specialty_counts[row])
    }

    /// Relation counts per column, in column order
    pub fn subject_counts(&self) -> &[usize] {
        &self.subject_counts
    }

    /// Relation counts per row, in row order
    pub fn specialty_counts(&self) -> &[usize] {
        &self.specialty_counts
    }

    /// Rearrange rows and columns; both orders must be permutations
    pub(crate) fn permuted(&self, row_order: &[usize], col_order: &[usize]) -> Matrix {
        debug_assert_eq!(row_order.len(), self.specialties.len());
        debug_assert_eq!(col_order.len(), self.subjects.len());

        let width = self.subjects.len();
        let specialties: Vec<Specialty> = row_order
            .iter()
            .map(|&r| self.specialties[r].clone())
            .collect();
        let subjects: Vec<Subject> = col_order
            .iter()
            .map(|&c| self.subjects[c].clone())
            .collect();

        let mut cells = Vec::with_capacity(self.cells.len());
        for &r in row_order {
            for &c in col_order {
                cells.push(self.cells[r * width + c].clone());
            }
        }

        Matrix {
            course_id: self.course_id.clone(),
            specialty_index: specialties
                .iter()
                .enumerate()
                .map(|(i, s)| (s.id.clone(), i))
                .collect(),
            subject_index: subjects
                .iter()
                .enumerate()
                .map(|(i, s)| (s.id.clone(), i))
                .collect(),
            specialty_counts: row_order
                .iter()
                .map(|&r| self.specialty_counts[r])
                .collect(),
            subject_counts: col_order.iter().map(|&c| self.subject_counts[c]).collect(),
            specialties,
            subjects,
            cells,
        }
    }
}
