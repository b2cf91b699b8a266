use log::debug;
use std::collections::HashSet;

use super::cell::Cell;
use super::resources::Resource;
use super::start_area::StartArea;
use crate::error::WorldError;

/// Static geometry of the foraging field plus the mutable resource list and
/// deposit counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    width: usize,
    height: usize,
    obstacles: HashSet<Cell>,
    resources: Vec<Resource>,
    start_area: StartArea,
}

impl GridWorld {
    pub fn new(width: usize, height: usize, start_area: StartArea) -> Result<Self, WorldError> {
        let origin = start_area.origin();
        if origin.x + start_area.width() > width || origin.y + start_area.height() > height {
            return Err(WorldError::StartAreaOutOfBounds {
                origin,
                width: start_area.width(),
                height: start_area.height(),
            });
        }
        Ok(Self {
            width,
            height,
            obstacles: HashSet::new(),
            resources: Vec::new(),
            start_area,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn add_obstacle(&mut self, cell: Cell) -> Result<(), WorldError> {
        self.check_free(cell)?;
        self.obstacles.insert(cell);
        Ok(())
    }

    pub fn add_resource(&mut self, cell: Cell, materials: u32) -> Result<(), WorldError> {
        self.check_free(cell)?;
        if materials == 0 {
            return Err(WorldError::EmptyResource(cell));
        }
        self.resources.push(Resource::new(cell, materials));
        Ok(())
    }

    fn check_free(&self, cell: Cell) -> Result<(), WorldError> {
        if !self.in_bounds(cell) {
            return Err(WorldError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            });
        }
        if self.obstacles.contains(&cell) || self.resources.iter().any(|r| r.position() == cell) {
            return Err(WorldError::CellOccupied(cell));
        }
        Ok(())
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// The active (non-empty) resource on `cell`, if any.
    pub fn is_occupied_by_resource(&self, cell: Cell) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.position() == cell && !r.is_depleted())
    }

    pub(crate) fn resource_mut(&mut self, cell: Cell) -> Option<&mut Resource> {
        self.resources
            .iter_mut()
            .find(|r| r.position() == cell && !r.is_depleted())
    }

    /// Resources in their fixed insertion order. Depleted entries linger
    /// until the end of the tick.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Cell> {
        self.obstacles.iter()
    }

    pub fn start_area(&self) -> &StartArea {
        &self.start_area
    }

    pub(crate) fn start_area_mut(&mut self) -> &mut StartArea {
        &mut self.start_area
    }

    pub fn start_area_cells(&self) -> HashSet<Cell> {
        self.start_area.cells().into_iter().collect()
    }

    pub fn remaining_materials(&self) -> u32 {
        self.resources.iter().map(Resource::materials).sum()
    }

    /// Drops every exhausted resource and returns where they were.
    pub fn remove_depleted_resources(&mut self) -> Vec<Cell> {
        let removed: Vec<Cell> = self
            .resources
            .iter()
            .filter(|r| r.is_depleted())
            .map(Resource::position)
            .collect();
        if !removed.is_empty() {
            self.resources.retain(|r| !r.is_depleted());
            debug!("Removed depleted resources at {:?}", removed);
        }
        removed
    }
}
