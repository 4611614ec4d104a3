use std::{
    panic::{self, AssertUnwindSafe},
    sync::atomic::{AtomicUsize, Ordering},
    time::Instant,
};

use log::{debug, info, trace, warn};
use parking_lot::Mutex;

use crate::error::RenderError;

use super::{Image, Ray, RenderContext};

/// Scanline renderer.
///
/// Workers claim rows from a shared counter and render each claimed row with their own [`Ray`].
/// All strategies produce bit-identical images.
pub struct Renderer {
    ctx: RenderContext,
}

impl Renderer {
    pub fn new(ctx: RenderContext) -> Renderer {
        Renderer { ctx }
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn into_context(self) -> RenderContext {
        self.ctx
    }

    /// Render a new image.
    pub fn render(&self) -> Result<Image, RenderError> {
        let (width, height) = self.ctx.resolution();
        let mut image = Image::new(width, height, self.ctx.options().render_type);
        self.render_to_image(&mut image)?;
        Ok(image)
    }

    /// Render into `image`, which must have the camera's resolution.
    pub fn render_to_image(&self, image: &mut Image) -> Result<(), RenderError> {
        let (width, height) = self.ctx.resolution();
        if image.width() != width || image.height() != height {
            return Err(RenderError::ImageSize {
                width: image.width(),
                height: image.height(),
            });
        }

        let options = self.ctx.options();
        let workers = options.workers;
        let strategy = match (workers, options.use_threads) {
            (0, _) => "sequential",
            (_, true) => "threads",
            (_, false) => "tasks",
        };
        info!("Render started: {width}x{height}, {strategy}, {workers} workers");
        let start = Instant::now();

        if workers == 0 {
            self.render_sequential(image);
        } else {
            // Row locks are never contended, a row is only locked by the worker that claimed it
            let rows: Vec<Mutex<&mut [f32]>> = image.rows_mut().map(Mutex::new).collect();
            if options.use_threads {
                self.render_threads(&rows, workers)?;
            } else {
                self.render_tasks(&rows, workers)?;
            }
        }

        info!("Render finished in {:?}", start.elapsed());
        Ok(())
    }

    fn render_sequential(&self, image: &mut Image) {
        let mut ray = Ray::new(&self.ctx);
        for (y, row) in image.rows_mut().enumerate() {
            render_row(&mut ray, y, row);
            trace!("Row {y} done");
        }
    }

    fn render_threads(&self, rows: &[Mutex<&mut [f32]>], workers: usize) -> Result<(), RenderError> {
        let next_row = AtomicUsize::new(0);
        run_threads(workers, |id| {
            claim_rows(id, &self.ctx, rows, &next_row);
        })
    }

    fn render_tasks(&self, rows: &[Mutex<&mut [f32]>], workers: usize) -> Result<(), RenderError> {
        let next_row = AtomicUsize::new(0);
        run_tasks(workers, |id| {
            claim_rows(id, &self.ctx, rows, &next_row);
        })
    }
}

/// Run `work(id)` on `workers` named OS threads and join them.
fn run_threads<F>(workers: usize, work: F) -> Result<(), RenderError>
where
    F: Fn(usize) + Sync,
{
    let work = &work;

    // Scope assures threads will be joined before exiting the scope
    let res = crossbeam::scope(|s| -> Result<(), RenderError> {
        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let handle = s
                .builder()
                .name(format!("Ren{id}"))
                .spawn(move |_| work(id))?;
            handles.push(handle);
        }

        for handle in handles {
            handle.join().map_err(|_| RenderError::WorkerPanicked)?;
        }
        Ok(())
    });

    let res = res.map_err(|_| RenderError::WorkerPanicked).and_then(|r| r);
    if let Err(RenderError::WorkerPanicked) = res {
        warn!("Render thread panicked");
    }
    res
}

/// Run `work(id)` as one task per worker on a dedicated pool.
fn run_tasks<F>(workers: usize, work: F) -> Result<(), RenderError>
where
    F: Fn(usize) + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|id| format!("RenTask{id}"))
        .build()?;

    let work = &work;

    // Scope resumes a task's panic on this thread once all tasks are done
    let res = panic::catch_unwind(AssertUnwindSafe(|| {
        pool.scope(|s| {
            for id in 0..workers {
                s.spawn(move |_| work(id));
            }
        })
    }));

    res.map_err(|_| {
        warn!("Render task panicked");
        RenderError::WorkerPanicked
    })
}

/// Worker loop, renders rows until the counter runs past the image.
fn claim_rows(
    id: usize,
    ctx: &RenderContext,
    rows: &[Mutex<&mut [f32]>],
    next_row: &AtomicUsize,
) -> usize {
    debug!("Worker {id} started");
    let mut ray = Ray::new(ctx);
    let mut rendered = 0;

    loop {
        let y = next_row.fetch_add(1, Ordering::Relaxed);
        let row = match rows.get(y) {
            Some(row) => row,
            None => break,
        };
        render_row(&mut ray, y, &mut row.lock());
        rendered += 1;
    }

    debug!("Worker {id} finished, {rendered} rows");
    rendered
}

fn render_row(ray: &mut Ray, y: usize, row: &mut [f32]) {
    for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
        let color = ray.cast(x, y);
        pixel.copy_from_slice(color.as_slice());
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::{
        camera::{Camera, CameraParams},
        color,
        kernel::{Kernel, KernelFamily},
        lighting::Lighting,
        render::RenderOptions,
        test_helpers::*,
    };
    use std::sync::Arc;

    fn renderer_with(camera: CameraParams, workers: usize, use_threads: bool) -> Renderer {
        let options = RenderOptions::builder()
            .plane_separation(0.05)
            .workers(workers)
            .use_threads(use_threads)
            .build()
            .unwrap();
        let ctx = RenderContext::new(
            Arc::new(sphere_volume(10)),
            Kernel::new(KernelFamily::Tent),
            Camera::new(camera).unwrap(),
            ramp_tf(),
            Lighting::default(),
            options,
        )
        .unwrap();
        Renderer::new(ctx)
    }

    fn renderer(workers: usize, use_threads: bool) -> Renderer {
        renderer_with(looking_at_cube(9, 7), workers, use_threads)
    }

    #[test]
    fn every_row_rendered() {
        let image = renderer(3, true).render().unwrap();

        assert_eq!(image.width(), 9);
        assert_eq!(image.height(), 7);
        // Center ray hits the sphere, corners miss it
        let center = image.pixel(4, 3).unwrap();
        assert!(center.w < 1.0);
        assert_eq!(image.pixel(0, 0), Some(color::transparent_rgbt()));
        // First row is not skipped
        assert_eq!(image.pixel(8, 0), Some(color::transparent_rgbt()));
    }

    #[test]
    fn strategies_match() {
        let sequential = renderer(0, false).render().unwrap();
        let threads = renderer(4, true).render().unwrap();
        let tasks = renderer(3, false).render().unwrap();

        assert_eq!(sequential, threads);
        assert_eq!(sequential, tasks);
    }

    #[test]
    fn more_workers_than_rows() {
        let sequential = renderer(0, false).render().unwrap();
        let threads = renderer(16, true).render().unwrap();
        assert_eq!(sequential, threads);
    }

    #[test]
    fn wrong_image_size() {
        let mut image = Image::new(2, 2, crate::render::RenderType::Rgbt);
        let res = renderer(0, false).render_to_image(&mut image);
        assert!(matches!(res, Err(RenderError::ImageSize { .. })));
    }

    #[test]
    fn worker_panic_is_reported() {
        let failing = |id: usize| {
            if id == 1 {
                panic!("worker {id} failed");
            }
        };

        assert!(matches!(
            run_threads(3, failing),
            Err(RenderError::WorkerPanicked)
        ));
        assert!(matches!(
            run_tasks(3, failing),
            Err(RenderError::WorkerPanicked)
        ));
    }

    #[test]
    fn every_worker_runs() {
        let ran = AtomicUsize::new(0);
        let count = |_id: usize| {
            ran.fetch_add(1, Ordering::Relaxed);
        };

        run_threads(4, count).unwrap();
        assert_eq!(ran.load(Ordering::Relaxed), 4);
        run_tasks(3, count).unwrap();
        assert_eq!(ran.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn minimal_image() {
        for (workers, use_threads) in [(0, false), (2, true), (2, false)] {
            let image = renderer_with(looking_at_cube(1, 1), workers, use_threads)
                .render()
                .unwrap();
            assert_eq!(image.as_slice().len(), 4);
            // Single pixel looks straight through the center
            assert!(image.pixel(0, 0).unwrap().w < 1.0);
        }
    }
}
