use std::num::NonZeroUsize;

use machine_learning::{
    MlErr,
    dataset::Dataset,
    fit,
    specs::{LossFnSpec, OptimizerSpec, TrainerSpec},
};

const XS: [f32; 6] = [-1., 0., 1., 2., 3., 4.];

fn spec(seed: u64) -> TrainerSpec {
    TrainerSpec {
        seed: Some(seed),
        ..TrainerSpec::default()
    }
}

#[test]
fn fits_a_line_with_the_default_spec() {
    let ys = XS.map(|x| 2. * x - 1.);
    let dataset = Dataset::from_columns(&XS, &ys).unwrap();

    let mut predictor = fit(&spec(3), dataset).unwrap();
    let y = predictor.predict(1.).unwrap();

    assert_eq!(predictor.losses().len(), 250);
    assert!((y - 1.).abs() < 0.5, "predicted {y}");
}

#[test]
fn same_seed_same_parameters() {
    let ys = XS.map(|x| 3. - x);

    let a = fit(&spec(11), Dataset::from_columns(&XS, &ys).unwrap()).unwrap();
    let b = fit(&spec(11), Dataset::from_columns(&XS, &ys).unwrap()).unwrap();

    assert_eq!(a.params(), b.params());
}

#[test]
fn a_huge_learning_rate_diverges() {
    let ys = XS.map(|x| 2. * x - 1.);
    let spec = TrainerSpec::linear_regression(
        NonZeroUsize::new(250).unwrap(),
        LossFnSpec::Mse,
        OptimizerSpec::GradientDescent { learning_rate: 10. },
        Some(0),
    );

    let err = fit(&spec, Dataset::from_columns(&XS, &ys).unwrap()).unwrap_err();
    assert!(matches!(err, MlErr::Diverged { .. }));
}
