use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use crate::errors::{PlannerError, Result};
use crate::models::{Goal, WorkoutEntry, WorkoutFeatures};

/// Difficulty injected for every request; requests carry no difficulty preference.
pub const DEFAULT_WORKOUT_DIFFICULTY: i32 = 3;

#[derive(Debug, Clone)]
struct FittedClassifier {
    tree: DecisionTree<f64, usize>,
    /// Class index -> catalog workout label
    labels: Vec<i64>,
}

/// Decision tree mapping (goal, time, difficulty) to a workout label
#[derive(Debug, Clone, Default)]
pub struct WorkoutClassifier {
    fitted: Option<FittedClassifier>,
}

impl WorkoutClassifier {
    /// Create an unfitted classifier
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fitted(catalog: &[WorkoutEntry]) -> Result<Self> {
        let mut classifier = Self::new();
        classifier.fit(catalog)?;
        Ok(classifier)
    }

    /// Train on the workout catalog. Every distinct label becomes a class.
    pub fn fit(&mut self, catalog: &[WorkoutEntry]) -> Result<()> {
        if catalog.is_empty() {
            return Err(PlannerError::schema("workout_plan", "workout catalog has no rows"));
        }

        let mut labels: Vec<i64> = catalog.iter().map(|entry| entry.workout_label).collect();
        labels.sort_unstable();
        labels.dedup();

        let mut features = Array2::<f64>::zeros((catalog.len(), WorkoutFeatures::COUNT));
        let mut targets = Array1::<usize>::zeros(catalog.len());

        for (i, entry) in catalog.iter().enumerate() {
            features.row_mut(i).assign(&WorkoutFeatures::from(entry).to_ndarray());
            targets[i] = class_index(&labels, entry.workout_label);
        }

        let dataset = Dataset::new(features, targets);
        let tree = DecisionTree::<f64, usize>::params()
            .fit(&dataset)
            .map_err(|e| PlannerError::Training(e.to_string()))?;

        debug!(
            "Workout classifier fitted on {} catalog entries ({} classes)",
            catalog.len(),
            labels.len()
        );

        self.fitted = Some(FittedClassifier { tree, labels });
        Ok(())
    }

    /// Most likely workout label for the given inputs
    pub fn predict(&self, goal: Goal, time_required: i32, difficulty: i32) -> Result<i64> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or(PlannerError::NotFitted("workout classifier"))?;

        let features = WorkoutFeatures::new(goal, time_required, difficulty)
            .to_ndarray()
            .insert_axis(Axis(0));
        let class = fitted.tree.predict(&features)[0];

        label_for_class(&fitted.labels, class)
    }

    /// Labels the classifier can emit, ascending
    pub fn labels(&self) -> Result<&[i64]> {
        self.fitted
            .as_ref()
            .map(|fitted| fitted.labels.as_slice())
            .ok_or(PlannerError::NotFitted("workout classifier"))
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

fn class_index(labels: &[i64], label: i64) -> usize {
    // labels is sorted and deduplicated from the same catalog
    labels.binary_search(&label).unwrap_or_default()
}

/// Catalog label for a tree class index. The tree only emits indices it was
/// trained on, so a miss means the tree and label table disagree.
fn label_for_class(labels: &[i64], class: usize) -> Result<i64> {
    labels
        .get(class)
        .copied()
        .ok_or(PlannerError::UnknownLabel(class as i64))
}

/// Name of the first catalog entry carrying `label`
pub fn resolve_workout_name(label: i64, catalog: &[WorkoutEntry]) -> Result<String> {
    catalog
        .iter()
        .find(|entry| entry.workout_label == label)
        .map(|entry| entry.workout_type.clone())
        .ok_or(PlannerError::UnknownLabel(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn catalog() -> Vec<WorkoutEntry> {
        vec![
            WorkoutEntry::new("Cardio", Goal::FatLoss, 30, 2, 0),
            WorkoutEntry::new("Strength Training", Goal::MuscleGain, 45, 4, 1),
            WorkoutEntry::new("HIIT", Goal::FatLoss, 25, 5, 2),
            WorkoutEntry::new("Yoga", Goal::Maintain, 40, 2, 3),
            WorkoutEntry::new("Bodyweight", Goal::MuscleGain, 20, 3, 4),
            WorkoutEntry::new("Stretching", Goal::Maintain, 15, 1, 5),
        ]
    }

    #[test]
    fn test_predict_before_fit() {
        let classifier = WorkoutClassifier::new();

        assert_matches!(
            classifier.predict(Goal::FatLoss, 30, DEFAULT_WORKOUT_DIFFICULTY),
            Err(PlannerError::NotFitted("workout classifier"))
        );
    }

    #[test]
    fn test_fit_empty_catalog() {
        assert_matches!(WorkoutClassifier::fitted(&[]), Err(PlannerError::Schema { .. }));
    }

    #[test]
    fn test_reproduces_training_rows() {
        let catalog = catalog();
        let classifier = WorkoutClassifier::fitted(&catalog).unwrap();

        for entry in &catalog {
            let label = classifier
                .predict(entry.goal, entry.time_required, entry.difficulty)
                .unwrap();
            assert_eq!(label, entry.workout_label, "misclassified {}", entry.workout_type);
        }
    }

    #[test]
    fn test_sparse_labels_round_trip() {
        let catalog = vec![
            WorkoutEntry::new("Swimming", Goal::FatLoss, 40, 3, 17),
            WorkoutEntry::new("Powerlifting", Goal::MuscleGain, 60, 5, -4),
        ];
        let classifier = WorkoutClassifier::fitted(&catalog).unwrap();

        assert_eq!(classifier.labels().unwrap(), &[-4, 17]);
        assert_eq!(classifier.predict(Goal::MuscleGain, 60, 5).unwrap(), -4);
        assert_eq!(classifier.predict(Goal::FatLoss, 40, 3).unwrap(), 17);
    }

    #[test]
    fn test_label_for_class() {
        let labels = [-4, 17];

        assert_eq!(label_for_class(&labels, 1).unwrap(), 17);
        assert_matches!(label_for_class(&labels, 2), Err(PlannerError::UnknownLabel(2)));
    }

    #[test]
    fn test_resolve_workout_name() {
        let catalog = catalog();

        assert_eq!(resolve_workout_name(3, &catalog).unwrap(), "Yoga");
        assert_matches!(resolve_workout_name(42, &catalog), Err(PlannerError::UnknownLabel(42)));
    }

    #[test]
    fn test_resolve_takes_first_match() {
        let mut catalog = catalog();
        catalog.push(WorkoutEntry::new("Pilates", Goal::Maintain, 40, 2, 3));

        assert_eq!(resolve_workout_name(3, &catalog).unwrap(), "Yoga");
    }
}
