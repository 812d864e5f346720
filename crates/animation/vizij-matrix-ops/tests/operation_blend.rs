use std::f32::consts::{FRAC_PI_2, PI};

use vizij_matrix_ops::{
    MotionEngine, MotionHandle, MotionInit, OpId, OpMode, OperationDescriptor, OperationKind,
    RuntimeOperation, ScalarMotor, Spline, SplinePlayback, Target1f,
};

type Op = RuntimeOperation<ScalarMotor>;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn id(raw: u8) -> OpId {
    OpId::new(raw).expect("valid id")
}

#[test]
fn constant_translate_reports_value_and_no_time() {
    let engine = MotionEngine::default();
    let d = OperationDescriptor::constant(id(0), OperationKind::TranslateX, 5.0).unwrap();
    let op = Op::new(&d, &engine).unwrap();
    assert_eq!(op.mode(), OpMode::ConstantValue);
    assert_eq!(op.value(), 5.0);
    assert_eq!(op.time_remaining(), 0);
    assert_eq!(op.id(), id(0));
    assert_eq!(op.kind(), OperationKind::TranslateX);
}

#[test]
fn matches_compares_id_only() {
    let engine = MotionEngine::default();
    let motion = MotionInit::default();
    let target = Target1f::new(1.0, 0.0, 3);
    let spline = Spline::through_points(&[(0.0, 1.0), (2.0, 3.0)]).unwrap();
    let op = Op::new(
        &OperationDescriptor::constant(id(4), OperationKind::ScaleX, 1.0).unwrap(),
        &engine,
    )
    .unwrap();

    for raw in [3u8, 4, 5] {
        let candidates = [
            OperationDescriptor::constant(id(raw), OperationKind::RotateZ, 0.1).unwrap(),
            OperationDescriptor::undriven(id(raw), OperationKind::TranslateY, &motion),
            OperationDescriptor::seeded(id(raw), OperationKind::ScaleX, &motion, 1.0),
            OperationDescriptor::eased_target(id(raw), OperationKind::RotateX, &motion, &target),
            OperationDescriptor::spline_driven(
                id(raw),
                OperationKind::ScaleUniform,
                &motion,
                &spline,
                SplinePlayback::default(),
            ),
        ];
        for d in &candidates {
            assert_eq!(op.matches(d), raw == 4, "{} id={raw}", d.setup().label());
        }
    }
}

#[test]
fn spline_time_remaining_counts_down_to_end() {
    let mut engine = MotionEngine::default();
    let motion = MotionInit::default();
    let spline = Spline::through_points(&[(0.0, 0.0), (20.0, 4.0), (30.0, 6.0)]).unwrap();
    let d = OperationDescriptor::spline_driven(
        id(1),
        OperationKind::TranslateY,
        &motion,
        &spline,
        SplinePlayback::default(),
    );
    let op = Op::new(&d, &engine).unwrap();
    assert_eq!(op.time_remaining(), 30);

    let mut last = op.time_remaining();
    for _ in 0..30 {
        engine.advance_frame(1);
        let remaining = op.time_remaining();
        assert!(remaining < last, "remaining={remaining} last={last}");
        assert_eq!(remaining, op.motion_handle().unwrap().time_remaining());
        last = remaining;
    }
    assert_eq!(op.time_remaining(), 0);
    approx(op.value(), 6.0, 1e-5);
}

#[test]
fn relax_with_zero_time_snaps_rotation() {
    let engine = MotionEngine::default();
    let motion = MotionInit::for_kind(OperationKind::RotateY);
    let d = OperationDescriptor::seeded(id(2), OperationKind::RotateY, &motion, FRAC_PI_2);
    let mut op = Op::new(&d, &engine).unwrap();
    approx(op.value(), FRAC_PI_2, 1e-6);

    op.blend_to_default(0);
    assert_eq!(op.value(), 0.0);
    assert_eq!(op.time_remaining(), 0);
}

#[test]
fn relax_over_time_converges_without_overshoot() {
    let mut engine = MotionEngine::default();
    let motion = MotionInit::for_kind(OperationKind::RotateX);
    let d = OperationDescriptor::seeded(id(3), OperationKind::RotateX, &motion, -2.5);
    let mut op = Op::new(&d, &engine).unwrap();

    op.blend_to_default(12);
    assert_eq!(op.time_remaining(), 12);
    let mut last = op.value();
    for _ in 0..12 {
        engine.advance_frame(1);
        let v = op.value();
        assert!(v >= last - 1e-6, "moving away from neutral: v={v} last={last}");
        assert!(v <= 1e-6, "overshoot past neutral: v={v}");
        last = v;
    }
    approx(op.value(), 0.0, 1e-6);
}

#[test]
fn relaxing_scale_heads_to_one() {
    let mut engine = MotionEngine::default();
    let motion = MotionInit::for_kind(OperationKind::ScaleZ);
    let d = OperationDescriptor::seeded(id(3), OperationKind::ScaleZ, &motion, 0.25);
    let mut op = Op::new(&d, &engine).unwrap();
    op.blend_to_default(8);
    engine.advance_frame(8);
    approx(op.value(), 1.0, 1e-6);
}

#[test]
fn constant_ignores_relax_and_playback_rate() {
    let mut engine = MotionEngine::default();
    let d = OperationDescriptor::constant(id(5), OperationKind::ScaleUniform, 2.0).unwrap();
    let mut op = Op::new(&d, &engine).unwrap();

    op.blend_to_default(10);
    engine.advance_frame(10);
    assert_eq!(op.value(), 2.0);

    op.set_playback_rate(3.0);
    assert_eq!(op.value(), 2.0);
    assert_eq!(op.time_remaining(), 0);
}

#[test]
fn driven_operation_eases_into_constant() {
    let mut engine = MotionEngine::default();
    let motion = MotionInit::default();
    let mut op = Op::new(
        &OperationDescriptor::seeded(id(6), OperationKind::TranslateZ, &motion, 4.0),
        &engine,
    )
    .unwrap();

    let hold = OperationDescriptor::constant(id(6), OperationKind::TranslateZ, -4.0).unwrap();
    op.blend_to_op(&hold, &SplinePlayback::with_blend(10.0)).unwrap();
    assert_eq!(op.mode(), OpMode::MotionDriven);
    approx(op.value(), 4.0, 1e-6);
    engine.advance_frame(5);
    approx(op.value(), 0.0, 1e-5);
    engine.advance_frame(5);
    approx(op.value(), -4.0, 1e-6);
}

#[test]
fn undriven_blend_leaves_motion_untouched() {
    let mut engine = MotionEngine::default();
    let motion = MotionInit::default();
    let target = Target1f::new(10.0, 0.0, 10);
    let mut op = Op::new(
        &OperationDescriptor::eased_target(id(7), OperationKind::TranslateX, &motion, &target),
        &engine,
    )
    .unwrap();
    engine.advance_frame(4);
    let mid = op.value();

    let undriven = OperationDescriptor::undriven(id(7), OperationKind::TranslateX, &motion);
    op.blend_to_op(&undriven, &SplinePlayback::with_blend(50.0)).unwrap();
    assert_eq!(op.value(), mid);
    assert_eq!(op.time_remaining(), 6);
    engine.advance_frame(6);
    approx(op.value(), 10.0, 1e-6);
}

#[test]
fn playback_rate_speeds_up_spline() {
    let mut engine = MotionEngine::default();
    let motion = MotionInit::default();
    let spline = Spline::through_points(&[(0.0, 0.0), (40.0, 1.0)]).unwrap();
    let mut op = Op::new(
        &OperationDescriptor::spline_driven(
            id(8),
            OperationKind::ScaleX,
            &motion,
            &spline,
            SplinePlayback::default(),
        ),
        &engine,
    )
    .unwrap();
    op.set_playback_rate(4.0);
    assert_eq!(op.time_remaining(), 10);
    engine.advance_frame(10);
    approx(op.value(), 1.0, 1e-6);
}

#[test]
fn rotation_spline_is_normalized() {
    let mut engine = MotionEngine::default();
    let motion = MotionInit::for_kind(OperationKind::RotateZ);
    let spline = Spline::through_points(&[(0.0, 0.0), (10.0, 1.5 * PI)]).unwrap();
    let op = Op::new(
        &OperationDescriptor::spline_driven(
            id(9),
            OperationKind::RotateZ,
            &motion,
            &spline,
            SplinePlayback::default(),
        ),
        &engine,
    )
    .unwrap();
    engine.advance_frame(10);
    approx(op.value(), -0.5 * PI, 1e-5);
}

#[test]
fn dropping_operations_releases_motors() {
    let engine = MotionEngine::default();
    let motion = MotionInit::default();
    let ops: Vec<Op> = (0..5)
        .map(|i| {
            Op::new(
                &OperationDescriptor::undriven(id(i), OperationKind::TranslateX, &motion),
                &engine,
            )
            .unwrap()
        })
        .collect();
    assert_eq!(engine.live_motors(), 5);
    drop(ops);
    assert_eq!(engine.live_motors(), 0);
}

#[test]
fn relax_after_slowed_spline_still_lands_on_time() {
    let mut engine = MotionEngine::default();
    let motion = MotionInit::default();
    let spline = Spline::through_points(&[(0.0, 0.0), (10.0, 4.0)]).unwrap();
    let mut op = Op::new(
        &OperationDescriptor::spline_driven(
            id(9),
            OperationKind::TranslateY,
            &motion,
            &spline,
            SplinePlayback::new(0.0, 0.0, 0.5),
        ),
        &engine,
    )
    .unwrap();
    engine.advance_frame(10);
    approx(op.value(), 2.0, 1e-5);

    op.blend_to_default(20);
    assert_eq!(op.time_remaining(), 20);
    engine.advance_frame(20);
    approx(op.value(), 0.0, 1e-6);
    assert_eq!(op.time_remaining(), 0);
}
