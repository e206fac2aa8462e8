//! Ranking of subjects and specialties by relation count
//!
//! Ordering is descending by count. Ties keep catalog order, which relies on
//! `sort_by_key` being a stable sort.

use crate::matrix::{Axis, Matrix};
use crate::{Specialty, SpecialtyId, Subject, SubjectId};
use std::cmp::Reverse;

/// Relation count of `id` along `axis`; zero for ids absent from the matrix
pub fn count_for(matrix: &Matrix, axis: Axis, id: &str) -> usize {
    match axis {
        Axis::Subject => matrix.subject_count(&SubjectId::new(id)),
        Axis::Specialty => matrix.specialty_count(&SpecialtyId::new(id)),
    }
    .unwrap_or(0)
}

/// Axis positions ordered by descending count
fn ranked_positions(counts: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by_key(|&i| Reverse(counts[i]));
    order
}

/// Subject ids ordered by descending relation count
///
/// # Examples
///
/// ```
/// use syllabus_domain::{build_matrix, rank_subjects, Relationship, Specialty, Subject};
///
/// let subjects = vec![
///     Subject::new("math", "Math", 4.0, 60.0),
///     Subject::new("phys", "Physics", 3.0, 60.0),
/// ];
/// let specialties = vec![Specialty::new("cardio", "Cardiology")];
/// let relationships = vec![Relationship::new("r1", "c1", "phys", "cardio", None)];
///
/// let matrix = build_matrix(&relationships, &subjects, &specialties, &"c1".into());
/// let ranked = rank_subjects(&matrix);
/// assert_eq!(ranked[0].as_str(), "phys");
/// assert_eq!(ranked[1].as_str(), "math");
/// ```
pub fn rank_subjects(matrix: &Matrix) -> Vec<SubjectId> {
    ranked_positions(matrix.subject_counts())
        .into_iter()
        .map(|i| matrix.subjects()[i].id.clone())
        .collect()
}

/// Specialty ids ordered by descending relation count
pub fn rank_specialties(matrix: &Matrix) -> Vec<SpecialtyId> {
    ranked_positions(matrix.specialty_counts())
        .into_iter()
        .map(|i| matrix.specialties()[i].id.clone())
        .collect()
}

/// Subjects ordered by descending relation count
pub fn ranked_subjects(matrix: &Matrix) -> Vec<&Subject> {
    ranked_positions(matrix.subject_counts())
        .into_iter()
        .map(|i| &matrix.subjects()[i])
        .collect()
}

/// Specialties ordered by descending relation count
pub fn ranked_specialties(matrix: &Matrix) -> Vec<&Specialty> {
    ranked_positions(matrix.specialty_counts())
        .into_iter()
        .map(|i| &matrix.specialties()[i])
        .collect()
}

/// The matrix with rows and columns rearranged into ranked order
pub fn ranked_view(matrix: &Matrix) -> Matrix {
    let rows = ranked_positions(matrix.specialty_counts());
    let cols = ranked_positions(matrix.subject_counts());
    matrix.permuted(&rows, &cols)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::{build_matrix, Relationship, Specialty, Subject};
    use proptest::prelude::*;

    proptest! {
        /// Property: ranking is descending and ties keep catalog order
        #[test]
        fn test_stable_ranking(links in prop::collection::vec((0..6usize, 0..4usize), 0..24)) {
            let subjects: Vec<Subject> = (0..6)
                .map(|i| Subject::new(format!("sub{}", i), format!("S{}", i), 1.0, 50.0))
                .collect();
            let specialties: Vec<Specialty> = (0..4)
                .map(|i| Specialty::new(format!("spec{}", i), format!("P{}", i)))
                .collect();
            let rels: Vec<Relationship> = links
                .iter()
                .enumerate()
                .map(|(n, (sub, spec))| {
                    Relationship::new(
                        format!("r{}", n),
                        "c1",
                        format!("sub{}", sub),
                        format!("spec{}", spec),
                        None,
                    )
                })
                .collect();

            let matrix = build_matrix(&rels, &subjects, &specialties, &"c1".into());
            let ranked = rank_subjects(&matrix);
            prop_assert_eq!(ranked.len(), subjects.len());

            let position = |id: &SubjectId| subjects.iter().position(|s| &s.id == id).unwrap();
            for pair in ranked.windows(2) {
                let a = count_for(&matrix, Axis::Subject, pair[0].as_str());
                let b = count_for(&matrix, Axis::Subject, pair[1].as_str());
                prop_assert!(a >= b);
                if a == b {
                    prop_assert!(position(&pair[0]) < position(&pair[1]));
                }
            }
        }
    }
}
