pub use criterion::Criterion;

pub use nalgebra::{point, vector, Point3};
use volren_lib::premade::scenes::sphere_scene;
pub use volren_lib::{
    camera::CameraParams,
    kernel::{Kernel, KernelFamily},
    render::{RenderOptions, Renderer},
};

pub const WIDTH: usize = 256;
pub const HEIGHT: usize = 256;

pub const VOLUME_SIDE: usize = 64;

pub const DEFAULT_CAMERA_POSITIONS: [Point3<f32>; 3] = [
    point![3.8, 6.9, 4.1],
    point![-5.0, 2.0, 5.0],
    point![0.0, 0.0, -7.5],
];

/// Sphere scene benchmark, one render per camera position.
pub struct BenchOptions {
    pub render_options: RenderOptions,
    pub kernel: Kernel,
    pub camera_positions: &'static [Point3<f32>],
    pub bench_name: String,
}

impl BenchOptions {
    pub fn new(
        render_options: RenderOptions,
        kernel: Kernel,
        camera_positions: &'static [Point3<f32>],
    ) -> BenchOptions {
        let strategy = match (render_options.workers, render_options.use_threads) {
            (0, _) => "seq".to_string(),
            (w, true) => format!("threads{w}"),
            (w, false) => format!("tasks{w}"),
        };
        let bench_name = format!("{} {strategy}", kernel.name());
        BenchOptions {
            render_options,
            kernel,
            camera_positions,
            bench_name,
        }
    }

    pub fn get_benchmark(self) -> impl FnOnce(&mut Criterion) {
        move |c: &mut Criterion| {
            let renderers: Vec<Renderer> = self
                .camera_positions
                .iter()
                .map(|&eye| {
                    let camera = CameraParams {
                        eye,
                        look_at: point![0.0, 0.0, 0.0],
                        up: vector![0.0, -1.0, 0.0],
                        width: WIDTH,
                        height: HEIGHT,
                        ..Default::default()
                    };
                    let ctx =
                        sphere_scene(VOLUME_SIDE, self.kernel, camera, self.render_options).unwrap();
                    Renderer::new(ctx)
                })
                .collect();

            c.bench_function(&self.bench_name, |b| {
                b.iter(|| {
                    for renderer in &renderers {
                        renderer.render().unwrap();
                    }
                })
            });
        }
    }
}
