use crate::common::*;

const WORKERS: usize = 4;

const SINGLE_POSITION: [Point3<f32>; 1] = [DEFAULT_CAMERA_POSITIONS[0]];

pub fn render_threads(c: &mut Criterion) {
    let render_options = RenderOptions::builder()
        .plane_separation(0.02)
        .workers(WORKERS)
        .use_threads(true)
        .build_unchecked();

    let bench_options = BenchOptions::new(
        render_options,
        Kernel::new(KernelFamily::Tent),
        &DEFAULT_CAMERA_POSITIONS,
    );

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}

pub fn render_tasks(c: &mut Criterion) {
    let render_options = RenderOptions::builder()
        .plane_separation(0.02)
        .workers(WORKERS)
        .use_threads(false)
        .build_unchecked();

    let bench_options = BenchOptions::new(
        render_options,
        Kernel::new(KernelFamily::Tent),
        &DEFAULT_CAMERA_POSITIONS,
    );

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}

pub fn worker_count_test(c: &mut Criterion) {
    for workers in [1, 2, 8] {
        let render_options = RenderOptions::builder()
            .plane_separation(0.02)
            .workers(workers)
            .build_unchecked();

        let bench_options = BenchOptions::new(
            render_options,
            Kernel::new(KernelFamily::BSpline3),
            &SINGLE_POSITION,
        );

        let benchmark = bench_options.get_benchmark();

        benchmark(c);
    }
}
