//! Generator driver.
//!
//! [`walk_program`] visits the top-level declarations of a program in a
//! fixed order and hands each one to a backend's [`ProgramVisitor`]. The
//! first error stops the walk.

use thriftgen_ast::{Const, Enum, Program, Service, Struct, Typedef};
use tracing::{debug, trace};

use crate::Result;

/// Per-declaration hooks of a backend.
///
/// Structs, unions and exceptions all arrive through
/// [`visit_struct`](ProgramVisitor::visit_struct), in declaration order.
pub trait ProgramVisitor {
    /// Called once before any declaration.
    fn begin(&mut self, _program: &Program) -> Result<()> {
        Ok(())
    }

    fn visit_typedef(&mut self, _typedef: &Typedef) -> Result<()> {
        Ok(())
    }

    fn visit_enum(&mut self, def: &Enum) -> Result<()>;

    /// All constants of the program at once. Not called when there are none.
    fn visit_consts(&mut self, consts: &[Const]) -> Result<()>;

    fn visit_struct(&mut self, def: &Struct) -> Result<()>;

    fn visit_service(&mut self, service: &Service) -> Result<()>;

    /// Called once after the last declaration.
    fn finish(&mut self, _program: &Program) -> Result<()> {
        Ok(())
    }
}

/// Walk `program`: begin, typedefs, enums, consts, structs and exceptions,
/// services, finish.
pub fn walk_program<V: ProgramVisitor + ?Sized>(program: &Program, visitor: &mut V) -> Result<()> {
    debug!(
        program = %program.name,
        typedefs = program.typedefs.len(),
        enums = program.enums.len(),
        consts = program.consts.len(),
        structs = program.structs.len(),
        services = program.services.len(),
        "walking program"
    );

    visitor.begin(program)?;

    for typedef in &program.typedefs {
        trace!(name = %typedef.name, "typedef");
        visitor.visit_typedef(typedef)?;
    }

    for def in &program.enums {
        trace!(name = %def.name, "enum");
        visitor.visit_enum(def)?;
    }

    if !program.consts.is_empty() {
        trace!(count = program.consts.len(), "consts");
        visitor.visit_consts(&program.consts)?;
    }

    for def in &program.structs {
        trace!(name = %def.name, exception = def.is_exception, "struct");
        visitor.visit_struct(def)?;
    }

    for service in &program.services {
        trace!(name = %service.name, "service");
        visitor.visit_service(service)?;
    }

    visitor.finish(program)
}
