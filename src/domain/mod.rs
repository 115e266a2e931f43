// Domain layer: study modes, prompt templates and the port to the upstream model.
// No HTTP framework types live here.

pub mod format;
pub mod model;
pub mod ports;
pub mod prompts;
