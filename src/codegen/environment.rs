use super::codegen_error::{CodegenError, Result};
use crate::ast::Identifier;
use std::collections::HashMap;

pub const MAX_REGISTER_ARGS: usize = 4;

const WORD_SIZE: i32 = 4;
/// Every `var` claims a pushed register pair, keeping the stack 8-byte aligned.
const LOCAL_SLOT_SIZE: i32 = 8;
/// Incoming argument registers are spilled right below the frame pointer.
const PARAM_AREA_SIZE: i32 = WORD_SIZE * MAX_REGISTER_ARGS as i32;

/// Frame-pointer relative locations of the names visible in one function body.
///
/// Scopes are flat: blocks do not open new ones and a redeclared name simply
/// gets rebound to its new slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    locals: HashMap<Identifier, i32>,
    next_local_offset: i32,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh context for a function body: parameters bound to their spill
    /// slots, the local cursor right below the spill area.
    pub fn for_function(params: &[Identifier]) -> Self {
        let locals = params
            .iter()
            .zip(0..)
            .map(|(param, i)| (param.clone(), WORD_SIZE * i - PARAM_AREA_SIZE))
            .collect();
        Self {
            locals,
            next_local_offset: -(PARAM_AREA_SIZE + WORD_SIZE),
        }
    }

    pub fn lookup(&self, name: &str) -> Result<i32> {
        self.locals
            .get(name)
            .copied()
            .ok_or_else(|| CodegenError::UndefinedVariable(name.to_owned()))
    }

    /// Binds `name` to the slot the value just pushed occupies and moves the
    /// cursor past it.
    pub fn declare(&mut self, name: &str) -> i32 {
        let offset = self.next_local_offset - WORD_SIZE;
        self.locals.insert(name.to_owned(), offset);
        self.next_local_offset -= LOCAL_SLOT_SIZE;
        offset
    }

    pub fn next_local_offset(&self) -> i32 {
        self.next_local_offset
    }
}
