//! The evaluation stack. The top is the most recently pushed object.

use super::ObjType;
use crate::error::EvalError;

/// An evaluated object, with the argument name it was given, if any.
#[derive(Debug)]
pub(super) struct StackObj<V> {
    pub name: Option<String>,
    pub ty: ObjType,
    /// Literal text, kept for conversion when the object fills a literal slot.
    pub text: Option<String>,
    pub value: V,
}

#[derive(Debug)]
pub(super) struct ObjStack<V> {
    objs: Vec<StackObj<V>>,
}

impl<V> ObjStack<V> {
    pub fn new() -> Self {
        ObjStack { objs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.objs.len()
    }

    pub fn push(&mut self, obj: StackObj<V>) {
        self.objs.push(obj);
    }

    pub fn top_mut(&mut self) -> Result<&mut StackObj<V>, EvalError> {
        self.objs.last_mut().ok_or_else(|| EvalError::Stack("AST expression stack is empty".to_string()))
    }

    /// Removes the top `n` objects, returned in the order they were pushed.
    pub fn pop(&mut self, n: usize) -> Result<Vec<StackObj<V>>, EvalError> {
        let start = self
            .objs
            .len()
            .checked_sub(n)
            .ok_or_else(|| EvalError::Stack(format!("AST expression stack size '{n}' out of range")))?;
        Ok(self.objs.split_off(start))
    }

    /// Unwraps the single node left by a complete evaluation.
    pub fn finish(mut self) -> Result<StackObj<V>, EvalError> {
        if self.objs.len() != 1 {
            return Err(EvalError::Stack(format!("invalid AST expression stack: size is {}", self.objs.len())));
        }

        let obj = self.objs.remove(0);
        match obj.ty {
            ObjType::Node(_) => Ok(obj),
            _ => Err(EvalError::Stack("top of AST expression stack is not of type 'node'".to_string())),
        }
    }
}
