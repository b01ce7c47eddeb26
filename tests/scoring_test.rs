use lossgraph::factor::{
    AssignmentRequest, FactorCategory, NewFactorModel, NewFactorValue, NewRiskFactor, BOND_STRENGTH, KNOWLEDGE_TYPE,
    TEMPORAL_ALIGNMENT,
};
use lossgraph::graph::{GraphStore, InterfaceId, MemoryStore, NewInterface};
use lossgraph::scoring::{RiskTier, ScoringEngine, ScoringError};
use std::sync::Arc;
use std::thread;

fn engine() -> ScoringEngine {
    ScoringEngine::with_store(Arc::new(MemoryStore::new()))
}

fn request(engine: &ScoringEngine, factor: &str, value: &str) -> AssignmentRequest {
    let (factor, value) = engine.find_value(factor, value).unwrap();
    AssignmentRequest::new(factor.id, value.id)
}

#[test]
fn test_end_to_end_critical_interface() {
    let engine = engine();
    engine.bootstrap().unwrap();
    let iface = engine
        .create_interface(NewInterface::new("interface_x", "team_1", "team_2").with_bond("institutional-weak"))
        .unwrap();

    let assignments = [
        request(&engine, KNOWLEDGE_TYPE, "institutional"),
        request(&engine, BOND_STRENGTH, "weak"),
    ];
    assert!(engine.assign_factors(&iface.id, &assignments).unwrap());

    let score = engine.compute_interface_score(&iface.id, None).unwrap();
    assert_eq!(score.total_energy_loss, 0.75);
    assert_eq!(score.energy_loss_percent, 75);
    assert_eq!(score.risk_level, RiskTier::Critical);

    let audited: f64 = score.factors_applied.iter().map(|f| f.weighted_contribution).sum();
    assert!((audited - 0.75).abs() < 1e-9);
    for applied in &score.factors_applied {
        assert_eq!(applied.weight, 1.0);
        assert_eq!(applied.contribution, applied.weighted_contribution);
    }

    // Legacy field is an independent read path
    assert_eq!(iface.energy_loss, Some(35));
}

#[test]
fn test_scoring_without_bootstrap_fails_cleanly() {
    let engine = engine();
    engine
        .create_interface(NewInterface::new("i1", "a", "b"))
        .unwrap();

    let err = engine
        .compute_interface_score(&InterfaceId::new("i1"), None)
        .unwrap_err();
    assert_eq!(err, ScoringError::NoActiveModel);
    assert!(err.is_not_found());
    assert!(engine.list_models().is_empty());
}

#[test]
fn test_models_score_independently() {
    let engine = engine();
    let baseline = engine.bootstrap().unwrap();
    let iface = engine.create_interface(NewInterface::new("i1", "a", "b")).unwrap();
    engine
        .assign_factors(
            &iface.id,
            &[
                request(&engine, KNOWLEDGE_TYPE, "codified"),
                request(&engine, TEMPORAL_ALIGNMENT, "misaligned"),
            ],
        )
        .unwrap();

    let temporal = engine.store().factor_by_name(TEMPORAL_ALIGNMENT).unwrap();
    let heavy = engine
        .create_model(NewFactorModel::new("temporal_heavy", "Temporal Heavy").with_hypothesis("Timing dominates"))
        .unwrap();
    engine.set_model_weight(heavy.id, temporal.id, 2.0, true).unwrap();

    let under_baseline = engine.compute_interface_score(&iface.id, Some(baseline.id)).unwrap();
    let under_heavy = engine.compute_interface_score(&iface.id, Some(heavy.id)).unwrap();

    assert_eq!(under_baseline.total_energy_loss, 0.35);
    assert_eq!(under_baseline.risk_level, RiskTier::High);
    assert_eq!(under_heavy.total_energy_loss, 0.6);
    assert_eq!(under_heavy.risk_level, RiskTier::Critical);
    assert_eq!(under_heavy.model_name, "temporal_heavy");

    // The active model is untouched by explicit-model scoring
    assert_eq!(engine.resolve_model(None).unwrap().id, baseline.id);
}

#[test]
fn test_activation_leaves_exactly_one_active() {
    let engine = engine();
    engine.bootstrap().unwrap();
    let models: Vec<_> = (0..4)
        .map(|i| engine.create_model(NewFactorModel::new(format!("m{}", i), format!("Model {}", i))).unwrap())
        .collect();

    for model in models.iter().chain(models.iter().rev()) {
        engine.activate_model(model.id).unwrap();
        let active: Vec<_> = engine.list_models().into_iter().filter(|m| m.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, model.id);
    }
}

#[test]
fn test_concurrent_activation_keeps_invariant() {
    let engine = Arc::new(engine());
    engine.bootstrap().unwrap();
    let ids: Vec<_> = (0..3)
        .map(|i| engine.create_model(NewFactorModel::new(format!("m{}", i), "M")).unwrap().id)
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let engine = Arc::clone(&engine);
            let ids = ids.clone();
            thread::spawn(move || {
                for round in 0..50 {
                    engine.activate_model(ids[(t + round) % ids.len()]).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let active = engine.list_models().into_iter().filter(|m| m.is_active).count();
    assert_eq!(active, 1);
}

#[test]
fn test_concurrent_bootstrap_is_idempotent() {
    let engine = Arc::new(engine());
    let handles: Vec<_> = (0..6)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.bootstrap().unwrap())
        })
        .collect();
    let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(models.windows(2).all(|w| w[0].id == w[1].id));
    assert_eq!(engine.list_factors().len(), 4);
    assert_eq!(engine.list_models().len(), 1);
}

#[test]
fn test_reassignment_does_not_accumulate() {
    let engine = engine();
    engine.bootstrap().unwrap();
    let iface = engine.create_interface(NewInterface::new("i1", "a", "b")).unwrap();

    engine
        .assign_factors(&iface.id, &[request(&engine, KNOWLEDGE_TYPE, "institutional")])
        .unwrap();
    engine
        .assign_factors(&iface.id, &[request(&engine, BOND_STRENGTH, "strong")])
        .unwrap();

    let current = engine.interface_assignments(&iface.id).unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].factor.factor_name, BOND_STRENGTH);

    engine.assign_factors(&iface.id, &[]).unwrap();
    assert!(engine.interface_assignments(&iface.id).unwrap().is_empty());
    let score = engine.compute_interface_score(&iface.id, None).unwrap();
    assert_eq!(score.risk_level, RiskTier::Low);
}

#[test]
fn test_assign_to_missing_interface() {
    let engine = engine();
    engine.bootstrap().unwrap();
    let err = engine
        .assign_factors(&InterfaceId::new("ghost"), &[request(&engine, KNOWLEDGE_TYPE, "codified")])
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_custom_factor_joins_scoring() {
    let engine = engine();
    engine.bootstrap().unwrap();
    let mentoring = engine
        .create_factor(
            NewRiskFactor::new("mentoring", "Mentoring", FactorCategory::EntityAttribute)
                .with_value(NewFactorValue::new("present", "Present", 0.0))
                .with_value(NewFactorValue::new("absent", "Absent", 0.2)),
        )
        .unwrap();
    let iface = engine.create_interface(NewInterface::new("i1", "a", "b")).unwrap();

    engine
        .assign_factors(
            &iface.id,
            &[
                request(&engine, "mentoring", "absent"),
                request(&engine, BOND_STRENGTH, "moderate"),
            ],
        )
        .unwrap();

    let score = engine.compute_interface_score(&iface.id, None).unwrap();
    assert_eq!(score.total_energy_loss, 0.4);
    assert_eq!(score.energy_loss_percent, 40);
    assert_eq!(score.factors_applied[0].factor_id, mentoring.id);
}
