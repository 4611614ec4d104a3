use crate::common::*;

fn render_sequential(c: &mut Criterion, family: KernelFamily) {
    let render_options = RenderOptions::builder()
        .plane_separation(0.02)
        .workers(0)
        .build_unchecked();

    let bench_options = BenchOptions::new(
        render_options,
        Kernel::new(family),
        &DEFAULT_CAMERA_POSITIONS,
    );

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}

pub fn render_box(c: &mut Criterion) {
    render_sequential(c, KernelFamily::Box);
}

pub fn render_tent(c: &mut Criterion) {
    render_sequential(c, KernelFamily::Tent);
}

pub fn render_bspline2(c: &mut Criterion) {
    render_sequential(c, KernelFamily::BSpline2);
}

pub fn render_bspline3(c: &mut Criterion) {
    render_sequential(c, KernelFamily::BSpline3);
}
