//! Input validation for timetabling runs.
//!
//! Checks the catalog and the GA configuration before the evolutionary
//! loop starts. Detects:
//! - Empty teacher, room or timeslot sets
//! - Populations too small to pair parents
//! - Probabilities outside [0, 1]
//! - Elite counts that leave no room for offspring
//!
//! All problems are collected so the caller sees the full list at once.

use crate::ga::GaConfig;
use crate::models::Catalog;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A catalog set that must be non-empty is empty.
    EmptyCatalogSet,
    /// The population cannot supply two distinct parents.
    PopulationTooSmall,
    /// The generation budget is zero.
    NoGenerations,
    /// A probability lies outside [0, 1] or is NaN.
    ProbabilityOutOfRange,
    /// Elites would fill the whole population.
    EliteCountTooHigh,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a catalog.
///
/// Checks that teachers, rooms and timeslots are non-empty.
///
/// An empty course list is accepted: it yields empty schedules. Repeated
/// identifiers are accepted too; they only skew the uniform draws.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    let sets = [
        ("teacher", &catalog.teachers),
        ("room", &catalog.rooms),
        ("timeslot", &catalog.timeslots),
    ];

    for (name, ids) in sets {
        if ids.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCatalogSet,
                format!("Catalog has no {name}s"),
            ));
        }
    }

    into_result(errors)
}

/// Validates a GA configuration.
///
/// Checks:
/// 1. `population_size >= 2`
/// 2. `max_generations >= 1`
/// 3. `mutation_probability` and `crossover_bias` in [0, 1]
/// 4. `elite_count < population_size`
pub fn validate_config(config: &GaConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.population_size < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::PopulationTooSmall,
            format!(
                "population_size must be at least 2, got {}",
                config.population_size
            ),
        ));
    }

    if config.max_generations == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoGenerations,
            "max_generations must be at least 1",
        ));
    }

    for (name, p) in [
        ("mutation_probability", config.mutation_probability),
        ("crossover_bias", config.crossover_bias),
    ] {
        if !(0.0..=1.0).contains(&p) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ProbabilityOutOfRange,
                format!("{name} must be within [0, 1], got {p}"),
            ));
        }
    }

    if config.population_size >= 2 && config.elite_count >= config.population_size {
        errors.push(ValidationError::new(
            ValidationErrorKind::EliteCountTooHigh,
            format!(
                "elite_count {} leaves no room for offspring in a population of {}",
                config.elite_count, config.population_size
            ),
        ));
    }

    into_result(errors)
}

/// Validates catalog and configuration together.
pub fn validate_input(catalog: &Catalog, config: &GaConfig) -> ValidationResult {
    let mut errors = Vec::new();
    if let Err(mut e) = validate_catalog(catalog) {
        errors.append(&mut e);
    }
    if let Err(mut e) = validate_config(config) {
        errors.append(&mut e);
    }
    into_result(errors)
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_catalog() -> Catalog {
        Catalog::new(
            ["C1", "C2", "C3"],
            ["T1", "T2", "T3"],
            ["R1", "R2"],
            ["Morning", "Afternoon"],
        )
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result
            .err()
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&valid_catalog(), &GaConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_sets() {
        let catalog = Catalog::new(["C1"], Vec::<String>::new(), ["R1"], Vec::<String>::new());
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::EmptyCatalogSet));
        assert_eq!(errors[0].message, "Catalog has no teachers");
        assert_eq!(errors[1].message, "Catalog has no timeslots");
    }

    #[test]
    fn test_empty_courses_allowed() {
        let catalog = Catalog::new(Vec::<String>::new(), ["T1"], ["R1"], ["Mon"]);
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_duplicate_ids_allowed() {
        let catalog = Catalog::new(["C1", "C1"], ["T1", "T1"], ["R1", "R2", "R1"], ["Mon"]);
        assert!(validate_catalog(&catalog).is_ok());
        assert!(validate_input(&catalog, &GaConfig::default()).is_ok());
    }

    #[test]
    fn test_population_too_small() {
        let config = GaConfig::default().with_population_size(1);
        assert_eq!(
            kinds(validate_config(&config)),
            vec![ValidationErrorKind::PopulationTooSmall]
        );
    }

    #[test]
    fn test_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert_eq!(kinds(validate_config(&config)), vec![ValidationErrorKind::NoGenerations]);
    }

    #[test]
    fn test_probability_out_of_range() {
        let config = GaConfig {
            mutation_probability: 1.5,
            crossover_bias: f64::NAN,
            ..GaConfig::default()
        };
        assert_eq!(
            kinds(validate_config(&config)),
            vec![
                ValidationErrorKind::ProbabilityOutOfRange,
                ValidationErrorKind::ProbabilityOutOfRange
            ]
        );
    }

    #[test]
    fn test_elite_count_too_high() {
        let config = GaConfig::default().with_population_size(4).with_elite_count(4);
        assert_eq!(
            kinds(validate_config(&config)),
            vec![ValidationErrorKind::EliteCountTooHigh]
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let catalog = Catalog::new(["C1"], ["T1"], Vec::<String>::new(), ["Mon"]);
        let config = GaConfig::default()
            .with_population_size(0)
            .with_max_generations(0);
        let errors = validate_input(&catalog, &config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyCatalogSet);
    }

    #[test]
    fn test_error_display() {
        let config = GaConfig::default().with_population_size(1);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].to_string(), "population_size must be at least 2, got 1");
    }
}
