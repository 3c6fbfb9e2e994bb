//! Window-less rendering backend that drives scenes with a fixed frame delta.

use std::time::Duration;

use anyhow::{ensure, Result as AnyResult};
use tracing::{debug, warn};
use word_defence_rendering::{FrameControl, FrameInput, Presentation, RenderingBackend, Scene};

/// Produces the input a player would have given on the next frame.
pub(crate) trait InputSource {
    /// Inspects the current scene and returns the input for the next frame.
    fn next_input(&mut self, scene: &Scene) -> FrameInput;
}

impl<T> InputSource for Option<T>
where
    T: InputSource,
{
    fn next_input(&mut self, scene: &Scene) -> FrameInput {
        match self {
            Some(source) => source.next_input(scene),
            None => FrameInput::default(),
        }
    }
}

/// Backend that presents nothing and advances as fast as the host allows.
#[derive(Debug)]
pub(crate) struct HeadlessBackend<I> {
    frame_delta: Duration,
    max_frames: u32,
    input: I,
}

impl<I> HeadlessBackend<I>
where
    I: InputSource,
{
    pub(crate) fn new(frame_delta: Duration, max_frames: u32, input: I) -> Self {
        Self {
            frame_delta,
            max_frames,
            input,
        }
    }
}

impl<I> RenderingBackend for HeadlessBackend<I>
where
    I: InputSource,
{
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl,
    {
        ensure!(
            !self.frame_delta.is_zero(),
            "frame delta must be greater than zero"
        );
        debug!(title = %presentation.window_title, "headless presentation started");

        let mut scene = presentation.scene;
        for frame in 0..self.max_frames {
            let input = self.input.next_input(&scene);
            if update_scene(self.frame_delta, input, &mut scene) == FrameControl::Exit {
                debug!(frames = frame + 1, "headless presentation finished");
                return Ok(());
            }
        }

        warn!(
            max_frames = self.max_frames,
            "frame limit reached before the session asked to exit"
        );
        Ok(())
    }
}
