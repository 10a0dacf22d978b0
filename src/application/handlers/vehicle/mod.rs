//! Vehicle handlers.

mod manage;

pub use manage::{
    DeleteVehicleCommand, DeleteVehicleHandler, DeleteVehicleResult, ListVehiclesHandler,
    RegisterVehicleCommand, RegisterVehicleHandler,
};
