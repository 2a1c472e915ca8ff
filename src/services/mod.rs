//!
//! Documentation of the services module.
//! Clients for the external APIs PackTravel talks to.
//!


pub mod google_maps;
