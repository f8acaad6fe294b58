//! One-shot background footprint computation with a memoized result.
//!
//! Scanning an obstacle's vertices is pushed off the frame loop. The loop
//! keeps calling [`DeferredFootprint::poll`] and treats the obstacle as
//! non-colliding until the result lands; after that the cell never changes.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use engine_core::{Mat4, Vec3};

use crate::collision::{compute_footprint, Footprint};

#[derive(Debug)]
enum FootprintState {
    Idle,
    Pending(Receiver<Footprint>),
    Ready(Footprint),
}

/// Memo cell for an obstacle footprint computed on a worker thread.
#[derive(Debug)]
pub struct DeferredFootprint {
    label: &'static str,
    state: FootprintState,
}

impl DeferredFootprint {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            state: FootprintState::Idle,
        }
    }

    /// Start the computation. Ignored once a request is in flight or done.
    pub fn request(&mut self, positions: Vec<Vec3>, placement: Mat4) {
        if !matches!(self.state, FootprintState::Idle) {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name(format!("footprint-{}", self.label))
            .spawn(move || {
                let _ = tx.send(compute_footprint(&positions, placement));
            });

        match spawned {
            Ok(_) => self.state = FootprintState::Pending(rx),
            Err(e) => log::warn!("Could not start {} footprint worker: {}", self.label, e),
        }
    }

    /// Collect a finished result if there is one; returns the memoized value.
    pub fn poll(&mut self) -> Option<&Footprint> {
        if let FootprintState::Pending(rx) = &self.state {
            match rx.try_recv() {
                Ok(footprint) => {
                    log::debug!("{} footprint ready: {:?}", self.label, footprint);
                    self.state = FootprintState::Ready(footprint);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    log::warn!("{} footprint worker exited without a result", self.label);
                    self.state = FootprintState::Idle;
                }
            }
        }
        self.get()
    }

    /// The memoized footprint, if computed.
    pub fn get(&self) -> Option<&Footprint> {
        match &self.state {
            FootprintState::Ready(footprint) => Some(footprint),
            _ => None,
        }
    }

    /// Whether a request has been made (pending or done).
    pub fn is_requested(&self) -> bool {
        !matches!(self.state, FootprintState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_ready(cell: &mut DeferredFootprint) -> Footprint {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(fp) = cell.poll() {
                return *fp;
            }
            assert!(Instant::now() < deadline, "footprint never resolved");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn not_ready_before_request() {
        let mut cell = DeferredFootprint::new("house");
        assert!(cell.poll().is_none());
        assert!(!cell.is_requested());
    }

    #[test]
    fn resolves_to_transformed_extents() {
        let mut cell = DeferredFootprint::new("house");
        cell.request(
            vec![Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0)],
            Mat4::from_translation(Vec3::new(8.0, 0.0, 0.0)),
        );
        assert!(cell.is_requested());
        let fp = wait_ready(&mut cell);
        assert_eq!(fp, Footprint::new(9.0, 7.0, 1.0, -1.0));
    }

    #[test]
    fn first_request_wins() {
        let mut cell = DeferredFootprint::new("volcano");
        cell.request(vec![Vec3::ZERO, Vec3::ONE], Mat4::IDENTITY);
        cell.request(vec![Vec3::splat(50.0)], Mat4::IDENTITY);
        let first = wait_ready(&mut cell);
        assert_eq!(first, Footprint::new(1.0, 0.0, 1.0, 0.0));

        cell.request(vec![Vec3::splat(-50.0)], Mat4::IDENTITY);
        assert_eq!(cell.poll(), Some(&first));
    }
}
