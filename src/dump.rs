//! Emitting the IR's debug text format.

use crate::ir::{
    AsmOutputKind, BlockId, Callee, ConstValue, EvalState, Executable, InstId, InstKind,
    Instruction, TypeId, TypeKind, TypeTable,
};
use std::fmt::{self, Display};

impl Executable {
    /// Borrow this executable as a value that [`Display`]s the debug text
    /// format.
    ///
    /// `indent` is a fixed left margin applied to every instruction line;
    /// it is not a nesting indent and never grows during the dump. Block
    /// label lines are not indented.
    ///
    /// The dump is a faithful, order-preserving rendering of the whole
    /// graph: blocks in declaration order, instructions in declaration
    /// order, one line each. Rendering the same graph twice produces
    /// byte-identical text.
    pub fn dump<'a>(&'a self, types: &'a TypeTable, indent: usize) -> Dump<'a> {
        Dump {
            exec: self,
            types,
            indent,
        }
    }
}

/// A borrowed executable plus the context needed to render it.
///
/// Created by [`Executable::dump`]; the only thing to do with one is
/// [`Display`] it.
#[derive(Debug)]
pub struct Dump<'a> {
    exec: &'a Executable,
    types: &'a TypeTable,
    indent: usize,
}

impl Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for block in self.exec.blocks() {
            writeln!(f, "{}_{}:", block.name_hint, block.debug_id)?;
            for &id in block.instructions() {
                self.instruction(self.exec.inst(id), f)?;
            }
        }
        Ok(())
    }
}

impl Dump<'_> {
    /// The `#id | type | uses | ` line prefix.
    fn prefix(&self, inst: &Instruction, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:width$}", "", width = self.indent)?;
        let type_name = match inst.ty {
            Some(ty) => self.types.get(ty).name.as_str(),
            None => "(unknown)",
        };
        write!(f, "#{:<3}| {:<12}| ", inst.debug_id, type_name)?;
        if inst.has_side_effects() {
            write!(f, "{:<2}| ", "-")
        } else {
            write!(f, "{:<2}| ", inst.ref_count)
        }
    }

    /// Render an operand position: the value inline when it is known, the
    /// `#id` back-reference when it only exists at run time.
    ///
    /// This is the seam that bounds recursion: run-time producer chains
    /// are referenced in one hop, never walked.
    fn operand(&self, id: InstId, f: &mut fmt::Formatter) -> fmt::Result {
        let inst = self.exec.inst(id);
        if inst.renders_inline() {
            self.value(inst.ty, &inst.state, f)
        } else {
            self.reference(inst, f)
        }
    }

    /// The short `#id` form of an instruction.
    fn reference(&self, inst: &Instruction, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", inst.debug_id)
    }

    /// The `name_id` form of a block, used by branches and phis. Resolves
    /// for blocks that have not been dumped yet.
    fn block_ref(&self, id: BlockId, f: &mut fmt::Formatter) -> fmt::Result {
        let block = self.exec.block(id);
        write!(f, "{}_{}", block.name_hint, block.debug_id)
    }

    /// Render an instruction's constant value.
    ///
    /// The evaluation state is checked before the type is consulted: the
    /// `undefined` and `zeroes` spellings are type-independent. A
    /// `Runtime` state reaching this renderer means the caller skipped the
    /// inline-vs-reference decision, which is a bug, not an input error.
    fn value(&self, ty: Option<TypeId>, state: &EvalState, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match state {
            EvalState::Runtime => panic!("run-time value reached the constant renderer"),
            EvalState::Undefined => return write!(f, "undefined"),
            EvalState::Zeroed => return write!(f, "zeroes"),
            EvalState::Known(value) => value,
        };
        let ty = match ty {
            Some(ty) => ty,
            None => panic!("constant value with no resolved type"),
        };
        self.known_value(ty, value, f)
    }

    fn known_value(&self, ty: TypeId, value: &ConstValue, f: &mut fmt::Formatter) -> fmt::Result {
        let ty = self.types.canonical(ty);
        match value {
            ConstValue::Void => write!(f, "{{}}"),
            ConstValue::Bool(true) => write!(f, "true"),
            ConstValue::Bool(false) => write!(f, "false"),
            ConstValue::Int(x) => {
                let sign = if x.negative { "-" } else { "" };
                write!(f, "{}{}", sign, x.magnitude)
            }
            ConstValue::Float(x) => write!(f, "{:.6}", x),
            ConstValue::Type(id) => write!(f, "{}", self.types.get(*id).name),
            ConstValue::Ptr(pointee) => {
                write!(f, "&")?;
                self.value(Some(self.pointee_type(ty)), pointee, f)
            }
            ConstValue::Fn { symbol } => write!(f, "{}", symbol),
            ConstValue::Scope { line, column } => {
                write!(f, "(scope:{}:{})", line + 1, column + 1)
            }
            ConstValue::Array(elems) => {
                let elem_ty = self.elem_type(ty);
                write!(f, "{}{{", self.types.get(ty).name)?;
                for (i, elem) in elems.iter().enumerate() {
                    if i != 0 {
                        write!(f, ",")?;
                    }
                    self.value(Some(elem_ty), elem, f)?;
                }
                write!(f, "}}")
            }
            ConstValue::Null => write!(f, "null"),
            ConstValue::Maybe(Some(child)) => self.value(Some(self.maybe_child_type(ty)), child, f),
            ConstValue::Maybe(None) => write!(f, "null"),
            ConstValue::Namespace { path } => write!(f, "(namespace: {})", path),
            ConstValue::BoundFn { symbol, first_arg } => {
                // The one place value rendering re-enters operand
                // rendering: the receiver is an instruction, not a value.
                write!(f, "bound {} to ", symbol)?;
                self.operand(*first_arg, f)
            }
            ConstValue::Aggregate => {
                let ty = self.types.get(ty);
                let kind = match ty.kind {
                    TypeKind::Struct => "struct",
                    TypeKind::Enum => "enum",
                    TypeKind::Union => "union",
                    TypeKind::ErrorUnion => "error union",
                    _ => panic!("aggregate constant with non-aggregate type {}", ty.name),
                };
                write!(f, "({} {} constant)", kind, ty.name)
            }
            ConstValue::PureError => write!(f, "(pure error constant)"),
            ConstValue::NoReturn => write!(f, "@unreachable()"),
        }
    }

    fn pointee_type(&self, ty: TypeId) -> TypeId {
        match self.types.get(ty).kind {
            TypeKind::Pointer { pointee } => pointee,
            _ => panic!(
                "pointer constant typed as non-pointer {}",
                self.types.get(ty).name
            ),
        }
    }

    fn elem_type(&self, ty: TypeId) -> TypeId {
        match self.types.get(ty).kind {
            TypeKind::Array { elem, .. } => elem,
            _ => panic!(
                "array constant typed as non-array {}",
                self.types.get(ty).name
            ),
        }
    }

    fn maybe_child_type(&self, ty: TypeId) -> TypeId {
        match self.types.get(ty).kind {
            TypeKind::Maybe { child } => child,
            _ => panic!(
                "optional constant typed as non-optional {}",
                self.types.get(ty).name
            ),
        }
    }

    /// Render one instruction: prefix, kind-specific body, newline.
    fn instruction(&self, inst: &Instruction, f: &mut fmt::Formatter) -> fmt::Result {
        self.prefix(inst, f)?;
        match &inst.kind {
            InstKind::Return { value } => {
                write!(f, "return ")?;
                self.operand(*value, f)?;
            }
            InstKind::Const => {
                self.value(inst.ty, &inst.state, f)?;
            }
            InstKind::BinOp { op, lhs, rhs } => {
                self.operand(*lhs, f)?;
                write!(f, " {} ", op.symbol())?;
                self.operand(*rhs, f)?;
            }
            InstKind::UnOp { op, operand } => {
                write!(f, "{} ", op.symbol())?;
                self.operand(*operand, f)?;
            }
            InstKind::DeclVar {
                name,
                is_inline,
                is_const,
                var_type,
                init,
            } => {
                let inline_kw = if *is_inline { "inline " } else { "" };
                let var_or_const = if *is_const { "const" } else { "var" };
                if let Some(var_type) = var_type {
                    write!(f, "{}{} {}: ", inline_kw, var_or_const, name)?;
                    self.operand(*var_type, f)?;
                    write!(f, " = ")?;
                } else {
                    write!(f, "{}{} {} = ", inline_kw, var_or_const, name)?;
                }
                self.operand(*init, f)?;
            }
            InstKind::Cast { value, dest_type } => {
                write!(f, "cast ")?;
                self.operand(*value, f)?;
                write!(f, " to {}", self.types.get(*dest_type).name)?;
            }
            InstKind::Call { callee, args } => {
                match callee {
                    Callee::Direct(symbol) => write!(f, "{}", symbol)?,
                    Callee::Indirect(fn_ref) => self.operand(*fn_ref, f)?,
                }
                write!(f, "(")?;
                for (i, &arg) in args.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    self.operand(arg, f)?;
                }
                write!(f, ")")?;
            }
            InstKind::CondBr {
                condition,
                then_block,
                else_block,
                is_inline,
            } => {
                let inline_kw = if *is_inline { "inline " } else { "" };
                write!(f, "{}if (", inline_kw)?;
                self.operand(*condition, f)?;
                write!(f, ") ")?;
                self.block_ref(*then_block, f)?;
                write!(f, " else ")?;
                self.block_ref(*else_block, f)?;
            }
            InstKind::Br { dest, is_inline } => {
                let inline_kw = if *is_inline { "inline " } else { "" };
                write!(f, "{}goto ", inline_kw)?;
                self.block_ref(*dest, f)?;
            }
            InstKind::Phi { incoming } => {
                assert!(
                    !incoming.is_empty(),
                    "phi instruction #{} has no incoming edges",
                    inst.debug_id
                );
                for (i, (block, value)) in incoming.iter().enumerate() {
                    if i != 0 {
                        write!(f, " ")?;
                    }
                    self.block_ref(*block, f)?;
                    write!(f, ":")?;
                    self.operand(*value, f)?;
                }
            }
            InstKind::ContainerInitList {
                container_type,
                items,
            } => {
                self.operand(*container_type, f)?;
                write!(f, "{{")?;
                for (i, &item) in items.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    self.operand(item, f)?;
                }
                write!(f, "}}")?;
            }
            InstKind::ContainerInitFields {
                container_type,
                fields,
            } => {
                self.operand(*container_type, f)?;
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    let comma = if i == 0 { "" } else { ", " };
                    write!(f, "{}.{} = ", comma, field.name)?;
                    self.operand(field.value, f)?;
                }
                write!(f, "}} // container init")?;
            }
            InstKind::StructInit {
                struct_type,
                fields,
            } => {
                write!(f, "{} {{", self.types.get(*struct_type).name)?;
                for (i, field) in fields.iter().enumerate() {
                    let comma = if i == 0 { "" } else { ", " };
                    write!(f, "{}.{} = ", comma, field.name)?;
                    self.operand(field.value, f)?;
                }
                write!(f, "}} // struct init")?;
            }
            InstKind::Unreachable => {
                write!(f, "unreachable")?;
            }
            InstKind::ElemPtr {
                array_ptr,
                index,
                safety_check_on,
            } => {
                write!(f, "&")?;
                self.operand(*array_ptr, f)?;
                write!(f, "[")?;
                self.operand(*index, f)?;
                write!(f, "]")?;
                if !safety_check_on {
                    write!(f, " // no safety")?;
                }
            }
            InstKind::VarPtr { name } => {
                write!(f, "&{}", name)?;
            }
            InstKind::LoadPtr { ptr } => {
                write!(f, "*")?;
                self.operand(*ptr, f)?;
            }
            InstKind::StorePtr { ptr, value } => {
                write!(f, "*")?;
                self.reference(self.exec.inst(*ptr), f)?;
                write!(f, " = ")?;
                self.operand(*value, f)?;
            }
            InstKind::TypeOf { value } => {
                write!(f, "@typeOf(")?;
                self.operand(*value, f)?;
                write!(f, ")")?;
            }
            InstKind::ToPtrType { value } => {
                write!(f, "@toPtrType(")?;
                self.operand(*value, f)?;
                write!(f, ")")?;
            }
            InstKind::PtrTypeChild { value } => {
                write!(f, "@ptrTypeChild(")?;
                self.operand(*value, f)?;
                write!(f, ")")?;
            }
            InstKind::FieldPtr {
                container_ptr,
                field_name,
            } => {
                write!(f, "fieldptr ")?;
                self.operand(*container_ptr, f)?;
                write!(f, ".{}", field_name)?;
            }
            InstKind::StructFieldPtr {
                struct_ptr,
                field_name,
            } => {
                write!(f, "@StructFieldPtr(&")?;
                self.operand(*struct_ptr, f)?;
                write!(f, ".{})", field_name)?;
            }
            InstKind::EnumFieldPtr {
                enum_ptr,
                field_name,
            } => {
                write!(f, "@EnumFieldPtr(&")?;
                self.operand(*enum_ptr, f)?;
                write!(f, ".{})", field_name)?;
            }
            InstKind::SetFnTest { fn_value, is_test } => {
                write!(f, "@setFnTest(")?;
                self.operand(*fn_value, f)?;
                write!(f, ", ")?;
                self.operand(*is_test, f)?;
                write!(f, ")")?;
            }
            InstKind::SetFnVisible {
                fn_value,
                is_visible,
            } => {
                write!(f, "@setFnVisible(")?;
                self.operand(*fn_value, f)?;
                write!(f, ", ")?;
                self.operand(*is_visible, f)?;
                write!(f, ")")?;
            }
            InstKind::SetDebugSafety {
                scope_value,
                safety_on,
            } => {
                write!(f, "@setDebugSafety(")?;
                self.operand(*scope_value, f)?;
                write!(f, ", ")?;
                self.operand(*safety_on, f)?;
                write!(f, ")")?;
            }
            InstKind::ArrayType { size, child_type } => {
                write!(f, "[")?;
                self.operand(*size, f)?;
                write!(f, "]")?;
                self.operand(*child_type, f)?;
            }
            InstKind::SliceType {
                child_type,
                is_const,
            } => {
                let const_kw = if *is_const { "const " } else { "" };
                write!(f, "[]{}", const_kw)?;
                self.operand(*child_type, f)?;
            }
            InstKind::Asm {
                template,
                outputs,
                inputs,
                clobbers,
                is_volatile,
            } => {
                let volatile_kw = if *is_volatile { " volatile" } else { "" };
                write!(f, "asm{} (\"{}\") : ", volatile_kw, template)?;
                for (i, output) in outputs.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[{}] \"{}\" (", output.name, output.constraint)?;
                    match &output.kind {
                        AsmOutputKind::ReturnType(ty_value) => {
                            write!(f, "-> ")?;
                            self.operand(*ty_value, f)?;
                        }
                        AsmOutputKind::Variable(var_name) => {
                            write!(f, "{}", var_name)?;
                        }
                    }
                    write!(f, ")")?;
                }
                write!(f, " : ")?;
                for (i, input) in inputs.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[{}] \"{}\" (", input.name, input.constraint)?;
                    self.operand(input.value, f)?;
                    write!(f, ")")?;
                }
                write!(f, " : ")?;
                for (i, clobber) in clobbers.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\"", clobber)?;
                }
                write!(f, ")")?;
            }
            InstKind::CompileVar { name } => {
                write!(f, "@compileVar(")?;
                self.operand(*name, f)?;
                write!(f, ")")?;
            }
            InstKind::SizeOf { type_value } => {
                write!(f, "@sizeOf(")?;
                self.operand(*type_value, f)?;
                write!(f, ")")?;
            }
            InstKind::TestNull { value } => {
                write!(f, "*")?;
                self.operand(*value, f)?;
                write!(f, " == null")?;
            }
            InstKind::UnwrapMaybe {
                value,
                safety_check_on,
            } => {
                write!(f, "&??*")?;
                self.operand(*value, f)?;
                if !safety_check_on {
                    write!(f, " // no safety")?;
                }
            }
            InstKind::Clz { value } => {
                write!(f, "@clz(")?;
                self.operand(*value, f)?;
                write!(f, ")")?;
            }
            InstKind::Ctz { value } => {
                write!(f, "@ctz(")?;
                self.operand(*value, f)?;
                write!(f, ")")?;
            }
            InstKind::SwitchBr {
                target,
                cases,
                else_block,
                is_inline,
            } => {
                let inline_kw = if *is_inline { "inline " } else { "" };
                write!(f, "{}switch (", inline_kw)?;
                self.operand(*target, f)?;
                write!(f, ") ")?;
                for case in cases {
                    self.operand(case.value, f)?;
                    write!(f, " => ")?;
                    self.block_ref(case.block, f)?;
                    write!(f, ", ")?;
                }
                write!(f, "else => ")?;
                self.block_ref(*else_block, f)?;
            }
            InstKind::SwitchVar {
                target_ptr,
                prong_value,
            } => {
                write!(f, "switchvar ")?;
                self.operand(*target_ptr, f)?;
                write!(f, ", ")?;
                self.operand(*prong_value, f)?;
            }
            InstKind::SwitchTarget { target_ptr } => {
                write!(f, "switchtarget ")?;
                self.operand(*target_ptr, f)?;
            }
            InstKind::EnumTag { value } => {
                write!(f, "enumtag ")?;
                self.operand(*value, f)?;
            }
            InstKind::StaticEval { value } => {
                write!(f, "@staticEval(")?;
                self.operand(*value, f)?;
                write!(f, ")")?;
            }
            InstKind::Import { name } => {
                write!(f, "@import(")?;
                self.operand(*name, f)?;
                write!(f, ")")?;
            }
            InstKind::ArrayLen { array } => {
                self.operand(*array, f)?;
                write!(f, ".len")?;
            }
            InstKind::Ref { value } => {
                write!(f, "ref ")?;
                self.operand(*value, f)?;
            }
        }
        writeln!(f)
    }
}
