use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vizij_matrix_ops::{
    Config, MatrixOpChain, MotionEngine, MotionInit, OpId, OperationKind, OperationSequence,
    ScalarMotor, Spline, SplinePlayback,
};

const BONES: usize = 256;

fn build_chains(
    engine: &MotionEngine,
    seq: &OperationSequence<'_>,
) -> Vec<MatrixOpChain<ScalarMotor>> {
    (0..BONES)
        .map(|_| MatrixOpChain::from_sequence(seq, engine).expect("chain"))
        .collect()
}

fn bench_op_update(c: &mut Criterion) {
    let cfg = Config {
        motor_capacity: BONES * 8,
        ..Config::default()
    };
    let mut engine = MotionEngine::new(&cfg);
    let rotate = MotionInit::for_kind(OperationKind::RotateY);
    let linear = MotionInit::default();
    let spline = Spline::through_points(&[(0.0, 0.0), (30.0, 1.0), (60.0, -1.0), (90.0, 0.0)])
        .expect("spline");

    let mut seq = OperationSequence::from_config(&cfg);
    seq.add_spline(
        OpId::new(0).unwrap(),
        OperationKind::TranslateX,
        &linear,
        &spline,
        SplinePlayback::default(),
    );
    seq.add_spline(
        OpId::new(1).unwrap(),
        OperationKind::RotateY,
        &rotate,
        &spline,
        SplinePlayback::default(),
    );
    seq.add_constant(OpId::new(2).unwrap(), OperationKind::ScaleUniform, 1.0)
        .unwrap();
    let chains = build_chains(&engine, &seq);

    c.bench_function("advance_frame_512_motors", |b| {
        b.iter(|| engine.advance_frame(black_box(1)))
    });

    c.bench_function("read_values_768_ops", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for chain in &chains {
                for (_, _, v) in chain.values() {
                    sum += v;
                }
            }
            black_box(sum)
        })
    });
}

criterion_group!(benches, bench_op_update);
criterion_main!(benches);
