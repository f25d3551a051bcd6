//! Unit tests for uc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ModelId, PatientId};

    #[test]
    fn next_is_sequential() {
        assert_eq!(PatientId(0).next(), PatientId(1));
        assert_eq!(PatientId(41).next().next(), PatientId(43));
    }

    #[test]
    fn model_id_is_seed() {
        assert_eq!(ModelId(7).seed(), 7);
    }

    #[test]
    fn display() {
        assert_eq!(PatientId(7).to_string(), "PatientId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{CoreError, SimTime};

    #[test]
    fn rejects_negative_and_non_finite() {
        assert!(matches!(SimTime::new(-0.5), Err(CoreError::InvalidTime(_))));
        assert!(SimTime::new(f64::NAN).is_err());
        assert!(SimTime::new(f64::INFINITY).is_err());
        assert!(SimTime::new(0.0).is_ok());
    }

    #[test]
    fn negative_zero_equals_zero() {
        assert_eq!(SimTime::new(-0.0).unwrap(), SimTime::ZERO);
    }

    #[test]
    fn after_moves_forward_only() {
        let t = SimTime::new(7.5).unwrap();
        assert_eq!(t.after(1.5).unwrap().hours(), 9.0);
        assert_eq!(t.after(0.0).unwrap(), t);
        assert!(t.after(-0.1).is_err());
        assert!(t.after(f64::NAN).is_err());
    }

    #[test]
    fn ordering_and_since() {
        let a = SimTime::new(1.0).unwrap();
        let b = SimTime::new(2.5).unwrap();
        assert!(a < b);
        assert_eq!(b.since(a), 1.5);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn serde_rejects_negative() {
        let ok: SimTime = serde_json::from_str("3.25").unwrap();
        assert_eq!(ok.hours(), 3.25);
        assert!(serde_json::from_str::<SimTime>("-1.0").is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(11);
        let mut b = SimRng::new(11);
        let xs: Vec<f64> = (0..32).map(|_| a.uniform()).collect();
        let ys: Vec<f64> = (0..32).map(|_| b.uniform()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_seed_different_stream() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(2);
        let xs: Vec<f64> = (0..8).map(|_| a.uniform()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.uniform()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn uniform_in_unit_interval() {
        let mut rng = SimRng::new(3);
        for _ in 0..10_000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u), "got {u}");
        }
    }

    #[test]
    fn bernoulli_extremes() {
        let mut rng = SimRng::new(5);
        assert!((0..1_000).all(|_| rng.bernoulli(1.0)));
        assert!((0..1_000).all(|_| !rng.bernoulli(0.0)));
    }
}

#[cfg(test)]
mod dist {
    use crate::{CoreError, Sample, SimRng, TimeDist};

    #[test]
    fn constant_does_not_vary() {
        let s = TimeDist::Constant { value: 1.5 }.build("c").unwrap();
        let mut rng = SimRng::new(0);
        assert!((0..10).all(|_| s.sample(&mut rng) == 1.5));
    }

    #[test]
    fn exponential_sample_mean_is_close() {
        let s = TimeDist::Exponential { mean: 0.25 }.build("exp").unwrap();
        let mut rng = SimRng::new(42);
        let n = 50_000;
        let mean = (0..n).map(|_| s.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 0.25).abs() < 0.01, "got {mean}");
    }

    #[test]
    fn uniform_stays_in_bounds() {
        let s = TimeDist::Uniform { low: 0.5, high: 0.75 }.build("u").unwrap();
        let mut rng = SimRng::new(9);
        for _ in 0..1_000 {
            let x = s.sample(&mut rng);
            assert!((0.5..=0.75).contains(&x), "got {x}");
        }
    }

    #[test]
    fn log_normal_matches_requested_mean() {
        let s = TimeDist::LogNormal { mean: 0.5, st_dev: 0.2 }.build("ln").unwrap();
        let mut rng = SimRng::new(17);
        let n = 50_000;
        let mean = (0..n).map(|_| s.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "got {mean}");
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(TimeDist::Exponential { mean: 0.0 }.build("x").is_err());
        assert!(TimeDist::Exponential { mean: f64::NAN }.build("x").is_err());
        assert!(TimeDist::Exponential { mean: 1e-320 }.build("x").is_err());
        assert!(TimeDist::Uniform { low: 2.0, high: 1.0 }.build("x").is_err());
        assert!(TimeDist::Gamma { shape: -1.0, scale: 1.0 }.build("x").is_err());
        assert!(TimeDist::Constant { value: -1.0 }.build("x").is_err());
    }

    #[test]
    fn error_names_the_field() {
        let err = TimeDist::Exponential { mean: -2.0 }.build("exam_time_dist").unwrap_err();
        match err {
            CoreError::InvalidConfiguration(msg) => assert!(msg.starts_with("exam_time_dist"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn json_tagged_shape() {
        let d: TimeDist = serde_json::from_str(r#"{"kind":"gamma","shape":2.0,"scale":0.5}"#).unwrap();
        assert_eq!(d, TimeDist::Gamma { shape: 2.0, scale: 0.5 });
        assert_eq!(d.mean(), 1.0);
    }
}

#[cfg(test)]
mod config {
    use std::io::Cursor;

    use crate::{ClinicParams, CoreError, TimeDist};

    #[test]
    fn default_is_valid() {
        ClinicParams::default().validate().unwrap();
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "hours_open": 8.0,
            "n_physicians": 2,
            "arrival_time_dist": { "kind": "exponential", "mean": 0.2 },
            "exam_time_dist": { "kind": "constant", "value": 0.25 },
            "mental_health_consult_time_dist": { "kind": "uniform", "low": 0.25, "high": 0.75 },
            "prob_depression": 0.3
        }"#;
        let p = ClinicParams::from_json_reader(Cursor::new(json)).unwrap();
        assert_eq!(p.hours_open, 8.0);
        assert_eq!(p.n_mental_health_specialists, 0, "defaults to zero when absent");
        assert_eq!(p.exam_time_dist, TimeDist::Constant { value: 0.25 });
        p.validate().unwrap();
    }

    #[test]
    fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("params.json");
        let params = ClinicParams::default();
        std::fs::write(&path, serde_json::to_string(&params).unwrap()).unwrap();

        assert_eq!(ClinicParams::from_json_path(&path).unwrap(), params);
        assert!(matches!(
            ClinicParams::from_json_path(&dir.path().join("missing.json")),
            Err(CoreError::Io(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ClinicParams::from_json_reader(Cursor::new("{ not json")).unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn rejects_bad_values() {
        let bad = |f: fn(&mut ClinicParams)| {
            let mut p = ClinicParams::default();
            f(&mut p);
            matches!(p.validate(), Err(CoreError::InvalidConfiguration(_)))
        };
        assert!(bad(|p| p.hours_open = -1.0));
        assert!(bad(|p| p.hours_open = f64::INFINITY));
        assert!(bad(|p| p.prob_depression = 1.5));
        assert!(bad(|p| p.prob_depression = f64::NAN));
        assert!(bad(|p| p.n_physicians = 0));
        assert!(bad(|p| p.arrival_time_dist = TimeDist::Constant { value: 0.0 }));
        assert!(bad(|p| p.exam_time_dist = TimeDist::Exponential { mean: -1.0 }));
        assert!(bad(|p| p.arrival_time_dist = TimeDist::Exponential { mean: 1e-320 }));
    }
}
