//! Mid-level IR type definitions.

pub use id_arena::{Arena, Id};

/// An identifier for an instruction in an [`Executable`]'s arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstId(pub(crate) Id<Instruction>);

impl From<InstId> for Id<Instruction> {
    #[inline]
    fn from(id: InstId) -> Self {
        id.0
    }
}

/// An identifier for a basic block in an [`Executable`]'s arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockId(pub(crate) Id<BasicBlock>);

impl From<BlockId> for Id<BasicBlock> {
    #[inline]
    fn from(id: BlockId) -> Self {
        id.0
    }
}

/// An identifier for a type in a [`TypeTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) Id<Type>);

impl From<TypeId> for Id<Type> {
    #[inline]
    fn from(id: TypeId) -> Self {
        id.0
    }
}

/// A resolved type, as supplied by the semantic analysis stage.
///
/// This crate only reads types: it needs their declared names and enough
/// structure (pointee, element, child links) to recurse through nested
/// constant values. It never infers or mutates them.
#[derive(Clone, Debug)]
pub struct Type {
    /// The type's declared name, e.g. `i32` or `[3]u8`.
    pub name: String,

    /// What sort of type this is.
    pub kind: TypeKind,
}

/// The kind of a [`Type`].
#[derive(Copy, Clone, Debug)]
pub enum TypeKind {
    /// The type of types; a type used as a first-class value.
    Meta,
    /// The zero-sized `void` type.
    Void,
    /// `bool`.
    Bool,
    /// The compile-time integer literal type, before it is coerced to a
    /// sized integer.
    NumLitInt,
    /// The compile-time float literal type.
    NumLitFloat,
    /// The type of the `null` literal, before coercion into an optional.
    NullLit,
    /// The type of the `undefined` literal.
    UndefLit,
    /// A sized integer type.
    Int,
    /// A sized float type.
    Float,
    /// The bottom type of expressions that never produce a value.
    Unreachable,
    /// A single-item pointer.
    Pointer {
        /// The pointed-to type.
        pointee: TypeId,
    },
    /// A fixed-length array.
    Array {
        /// The element type.
        elem: TypeId,
        /// The number of elements.
        len: u64,
    },
    /// An optional ("maybe") type.
    Maybe {
        /// The payload type.
        child: TypeId,
    },
    /// A function type.
    Fn,
    /// A lexical scope used as a value (labeled block).
    Scope,
    /// An imported namespace.
    Namespace,
    /// A function bound to its first argument (partial application).
    BoundFn,
    /// A struct type. Constants of this type dump opaquely.
    Struct,
    /// An enum type. Constants of this type dump opaquely.
    Enum,
    /// A union type. Constants of this type dump opaquely.
    Union,
    /// An error union type. Constants of this type dump opaquely.
    ErrorUnion,
    /// The type of a bare error value with no payload.
    PureError,
    /// A declared alias for another type. Constant rendering looks through
    /// the alias to the canonical type but keeps the value as-is.
    Alias {
        /// The aliased type.
        canonical: TypeId,
    },
}

/// The table of resolved types referenced by an IR graph.
///
/// Owned by the semantic analysis stage; the dump engine borrows it
/// read-only for the duration of a dump.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: Arena<Type>,
}

impl TypeTable {
    /// Create an empty type table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type to the table and return its id.
    pub fn intern(&mut self, name: impl Into<String>, kind: TypeKind) -> TypeId {
        TypeId(self.types.alloc(Type {
            name: name.into(),
            kind,
        }))
    }

    /// Get the type with the given id.
    ///
    /// # Panics
    ///
    /// May panic or produce incorrect results if given a `TypeId` from
    /// another `TypeTable`'s arena.
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.0]
    }

    /// Resolve a declared alias to the type it ultimately names.
    ///
    /// Returns `id` unchanged for non-alias types.
    pub fn canonical(&self, id: TypeId) -> TypeId {
        let mut id = id;
        while let TypeKind::Alias { canonical } = self.get(id).kind {
            id = canonical;
        }
        id
    }
}

/// An arbitrary-width integer constant, stored as a sign plus an unsigned
/// magnitude so that formatting is the same for literal and sized kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IntValue {
    /// Whether the value is negative.
    pub negative: bool,

    /// The absolute value.
    pub magnitude: u64,
}

impl From<i64> for IntValue {
    fn from(x: i64) -> Self {
        IntValue {
            negative: x < 0,
            magnitude: x.unsigned_abs(),
        }
    }
}

impl From<u64> for IntValue {
    fn from(x: u64) -> Self {
        IntValue {
            negative: false,
            magnitude: x,
        }
    }
}

/// A statically-known constant value.
///
/// Only meaningful inside [`EvalState::Known`]. Which variant is legal is
/// determined by the owning instruction's resolved type; a mismatch between
/// the two is a bug in the IR producer and the dump engine treats it as
/// fatal.
#[derive(Clone, Debug)]
pub enum ConstValue {
    /// The single value of type `void`.
    Void,
    /// A boolean.
    Bool(bool),
    /// An integer, literal-typed or sized.
    Int(IntValue),
    /// A float, literal-typed or sized.
    Float(f64),
    /// A type used as a value.
    Type(TypeId),
    /// A pointer; owns the pointed-to value.
    ///
    /// The pointee is a full evaluation-state cell rather than a bare
    /// value, so zero-filled and undefined pointees keep their spelling
    /// when rendered. The same holds for array elements and optional
    /// payloads. A `Runtime` state nested inside a known constant is
    /// malformed and the dump engine treats it as fatal.
    Ptr(Box<EvalState>),
    /// A function, referenced by its link name. Function bodies are never
    /// part of a constant.
    Fn {
        /// The function's symbol name.
        symbol: String,
    },
    /// A lexical scope, referenced by the source position that opened it.
    Scope {
        /// Zero-based source line.
        line: u32,
        /// Zero-based source column.
        column: u32,
    },
    /// An array; owns its elements. The length comes from the array type.
    Array(Vec<EvalState>),
    /// The `null` literal.
    Null,
    /// An optional: either absent or an owned payload value.
    Maybe(Option<Box<EvalState>>),
    /// An imported namespace, referenced by import path.
    Namespace {
        /// The import path.
        path: String,
    },
    /// A function bound to its first argument.
    BoundFn {
        /// The bound function's symbol name.
        symbol: String,
        /// The instruction producing the receiver argument.
        first_arg: InstId,
    },
    /// A struct, enum, union, or error union constant. These dump as an
    /// opaque placeholder; field contents are not textualized.
    Aggregate,
    /// An error value with no payload.
    PureError,
    /// A value of the unreachable type.
    NoReturn,
}

/// Whether and when an instruction's value is known.
#[derive(Clone, Debug)]
pub enum EvalState {
    /// The value only exists at run time. Uses of this instruction dump as
    /// a `#id` reference, never inline.
    Runtime,
    /// Explicitly unspecified, e.g. `undefined`-initialized storage.
    Undefined,
    /// Implicitly zero-filled storage.
    Zeroed,
    /// Known at compile time; uses dump the value inline.
    Known(ConstValue),
}

/// A binary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BinOpKind {
    BoolOr,
    BoolAnd,
    CmpEq,
    CmpNotEq,
    CmpLessThan,
    CmpGreaterThan,
    CmpLessOrEq,
    CmpGreaterOrEq,
    BinOr,
    BinXor,
    BinAnd,
    ShiftLeft,
    ShiftLeftWrap,
    ShiftRight,
    Add,
    AddWrap,
    Sub,
    SubWrap,
    Mul,
    MulWrap,
    Div,
    Mod,
    ArrayCat,
    ArrayMult,
}

#[cfg(feature = "dump")]
impl BinOpKind {
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            BinOpKind::BoolOr => "BoolOr",
            BinOpKind::BoolAnd => "BoolAnd",
            BinOpKind::CmpEq => "==",
            BinOpKind::CmpNotEq => "!=",
            BinOpKind::CmpLessThan => "<",
            BinOpKind::CmpGreaterThan => ">",
            BinOpKind::CmpLessOrEq => "<=",
            BinOpKind::CmpGreaterOrEq => ">=",
            BinOpKind::BinOr => "|",
            BinOpKind::BinXor => "^",
            BinOpKind::BinAnd => "&",
            BinOpKind::ShiftLeft => "<<",
            BinOpKind::ShiftLeftWrap => "<<%",
            BinOpKind::ShiftRight => ">>",
            BinOpKind::Add => "+",
            BinOpKind::AddWrap => "+%",
            BinOpKind::Sub => "-",
            BinOpKind::SubWrap => "-%",
            BinOpKind::Mul => "*",
            BinOpKind::MulWrap => "*%",
            BinOpKind::Div => "/",
            BinOpKind::Mod => "%",
            BinOpKind::ArrayCat => "++",
            BinOpKind::ArrayMult => "**",
        }
    }
}

/// A unary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum UnOpKind {
    BoolNot,
    BinNot,
    Negate,
    NegateWrap,
    AddressOf,
    ConstAddressOf,
    Deref,
    Maybe,
    Error,
    UnwrapError,
    UnwrapMaybe,
    MaybeReturn,
    ErrorReturn,
}

#[cfg(feature = "dump")]
impl UnOpKind {
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            UnOpKind::BoolNot => "!",
            UnOpKind::BinNot => "~",
            UnOpKind::Negate => "-",
            UnOpKind::NegateWrap => "-%",
            UnOpKind::AddressOf => "&",
            UnOpKind::ConstAddressOf => "&const",
            UnOpKind::Deref => "*",
            UnOpKind::Maybe => "?",
            UnOpKind::Error => "%",
            UnOpKind::UnwrapError => "%%",
            UnOpKind::UnwrapMaybe => "??",
            UnOpKind::MaybeReturn => "?return",
            UnOpKind::ErrorReturn => "%return",
        }
    }
}

/// What a call instruction calls.
#[derive(Clone, Debug)]
pub enum Callee {
    /// A directly resolved function, by symbol name.
    Direct(String),
    /// A function value produced by another instruction.
    Indirect(InstId),
}

/// One `name = value` pair in a container or struct initializer.
#[derive(Clone, Debug)]
pub struct FieldInit {
    /// The field's name.
    pub name: String,

    /// The instruction producing the field's value.
    pub value: InstId,
}

/// One case arm of a switch branch.
#[derive(Clone, Debug)]
pub struct SwitchCase {
    /// The instruction producing the case's comparison value.
    pub value: InstId,

    /// The block to branch to when the target matches.
    pub block: BlockId,
}

/// An output operand of an inline assembly expression.
#[derive(Clone, Debug)]
pub struct AsmOutput {
    /// The symbolic name the template refers to this operand by.
    pub name: String,

    /// The register constraint string.
    pub constraint: String,

    /// Where the output goes.
    pub kind: AsmOutputKind,
}

/// The destination of an [`AsmOutput`].
#[derive(Clone, Debug)]
pub enum AsmOutputKind {
    /// The output is written to a named variable.
    Variable(String),
    /// The output becomes the asm expression's result, of the given type.
    ReturnType(InstId),
}

/// An input operand of an inline assembly expression.
#[derive(Clone, Debug)]
pub struct AsmInput {
    /// The symbolic name the template refers to this operand by.
    pub name: String,

    /// The register constraint string.
    pub constraint: String,

    /// The instruction producing the input value.
    pub value: InstId,
}

/// An instruction's operation and its kind-specific operands.
///
/// Operand [`InstId`]s and destination [`BlockId`]s are non-owning
/// references back into the same [`Executable`]; ownership runs strictly
/// executable -> block -> instruction.
#[derive(Clone, Debug)]
pub enum InstKind {
    /// Return a value from the current function.
    Return {
        /// The returned value.
        value: InstId,
    },
    /// Materialize this instruction's own constant value. The value lives
    /// in the instruction's [`EvalState`].
    Const,
    /// A binary operation.
    BinOp {
        /// The operator.
        op: BinOpKind,
        /// Left operand.
        lhs: InstId,
        /// Right operand.
        rhs: InstId,
    },
    /// A unary operation.
    UnOp {
        /// The operator.
        op: UnOpKind,
        /// The operand.
        operand: InstId,
    },
    /// Declare and initialize a source-level variable.
    DeclVar {
        /// The variable's name.
        name: String,
        /// Whether the declaration is `inline` (comptime-unrolled).
        is_inline: bool,
        /// Whether the variable is a `const`.
        is_const: bool,
        /// The declared type, when one was written in the source.
        var_type: Option<InstId>,
        /// The initializer.
        init: InstId,
    },
    /// Convert a value to another type.
    Cast {
        /// The value being converted.
        value: InstId,
        /// The destination type.
        dest_type: TypeId,
    },
    /// Call a function.
    Call {
        /// What is being called.
        callee: Callee,
        /// Arguments, in source order.
        args: Vec<InstId>,
    },
    /// Two-way conditional branch.
    CondBr {
        /// The branch condition.
        condition: InstId,
        /// Destination when the condition is true.
        then_block: BlockId,
        /// Destination when the condition is false.
        else_block: BlockId,
        /// Whether the branch is `inline` (comptime-resolved).
        is_inline: bool,
    },
    /// Unconditional branch.
    Br {
        /// The destination block.
        dest: BlockId,
        /// Whether the branch is `inline` (comptime-resolved).
        is_inline: bool,
    },
    /// SSA phi node. Must have at least one incoming edge.
    Phi {
        /// `(predecessor block, incoming value)` pairs, in predecessor
        /// declaration order.
        incoming: Vec<(BlockId, InstId)>,
    },
    /// Positional container initializer, e.g. `T{a, b, c}`.
    ContainerInitList {
        /// The instruction producing the container type.
        container_type: InstId,
        /// The items, in order.
        items: Vec<InstId>,
    },
    /// Named-field container initializer, e.g. `T{.x = a}`.
    ContainerInitFields {
        /// The instruction producing the container type.
        container_type: InstId,
        /// The field initializers, in order.
        fields: Vec<FieldInit>,
    },
    /// Struct initializer with a fully resolved struct type.
    StructInit {
        /// The struct type.
        struct_type: TypeId,
        /// The field initializers, in order.
        fields: Vec<FieldInit>,
    },
    /// Marks a point that control flow cannot reach.
    Unreachable,
    /// Address of an array element.
    ElemPtr {
        /// The instruction producing the array pointer.
        array_ptr: InstId,
        /// The element index.
        index: InstId,
        /// Whether the bounds check is still enabled.
        safety_check_on: bool,
    },
    /// Address of a named variable.
    VarPtr {
        /// The variable's name.
        name: String,
    },
    /// Load through a pointer.
    LoadPtr {
        /// The pointer to load from.
        ptr: InstId,
    },
    /// Store through a pointer.
    StorePtr {
        /// The pointer to store to.
        ptr: InstId,
        /// The stored value.
        value: InstId,
    },
    /// The `@typeOf` builtin.
    TypeOf {
        /// The inspected value.
        value: InstId,
    },
    /// The `@toPtrType` builtin.
    ToPtrType {
        /// The inspected value.
        value: InstId,
    },
    /// The `@ptrTypeChild` builtin.
    PtrTypeChild {
        /// The inspected value.
        value: InstId,
    },
    /// Address of a container field that has not been resolved to a
    /// concrete struct or enum field yet.
    FieldPtr {
        /// The instruction producing the container pointer.
        container_ptr: InstId,
        /// The field's name.
        field_name: String,
    },
    /// Address of a resolved struct field.
    StructFieldPtr {
        /// The instruction producing the struct pointer.
        struct_ptr: InstId,
        /// The field's name.
        field_name: String,
    },
    /// Address of a resolved enum payload field.
    EnumFieldPtr {
        /// The instruction producing the enum pointer.
        enum_ptr: InstId,
        /// The field's name.
        field_name: String,
    },
    /// The `@setFnTest` builtin.
    SetFnTest {
        /// The function being marked.
        fn_value: InstId,
        /// Whether it is a test.
        is_test: InstId,
    },
    /// The `@setFnVisible` builtin.
    SetFnVisible {
        /// The function being marked.
        fn_value: InstId,
        /// Whether it is exported.
        is_visible: InstId,
    },
    /// The `@setDebugSafety` builtin.
    SetDebugSafety {
        /// The scope whose safety setting changes.
        scope_value: InstId,
        /// Whether safety checks are enabled.
        safety_on: InstId,
    },
    /// Construct an array type, e.g. `[n]T`.
    ArrayType {
        /// The instruction producing the length.
        size: InstId,
        /// The instruction producing the element type.
        child_type: InstId,
    },
    /// Construct a slice type, e.g. `[]const T`.
    SliceType {
        /// The instruction producing the element type.
        child_type: InstId,
        /// Whether the slice's elements are const.
        is_const: bool,
    },
    /// An inline assembly expression.
    Asm {
        /// The assembly template text.
        template: String,
        /// Output operands, in declaration order.
        outputs: Vec<AsmOutput>,
        /// Input operands, in declaration order.
        inputs: Vec<AsmInput>,
        /// Clobbered registers, in declaration order.
        clobbers: Vec<String>,
        /// Whether the asm is `volatile`.
        is_volatile: bool,
    },
    /// The `@compileVar` builtin.
    CompileVar {
        /// The instruction producing the variable's name.
        name: InstId,
    },
    /// The `@sizeOf` builtin.
    SizeOf {
        /// The instruction producing the measured type.
        type_value: InstId,
    },
    /// Test whether an optional's pointee is null.
    TestNull {
        /// The instruction producing the optional's pointer.
        value: InstId,
    },
    /// Unwrap an optional through a pointer, yielding the payload address.
    UnwrapMaybe {
        /// The instruction producing the optional's pointer.
        value: InstId,
        /// Whether the null check is still enabled.
        safety_check_on: bool,
    },
    /// The `@clz` builtin.
    Clz {
        /// The operand.
        value: InstId,
    },
    /// The `@ctz` builtin.
    Ctz {
        /// The operand.
        value: InstId,
    },
    /// Multi-way branch on a target value.
    SwitchBr {
        /// The instruction producing the switched-on value.
        target: InstId,
        /// The case arms, in declaration order.
        cases: Vec<SwitchCase>,
        /// The mandatory default destination.
        else_block: BlockId,
        /// Whether the switch is `inline` (comptime-resolved).
        is_inline: bool,
    },
    /// Rebind the switch target pointer inside a prong.
    SwitchVar {
        /// The pointer to the switched-on value.
        target_ptr: InstId,
        /// The prong's value.
        prong_value: InstId,
    },
    /// Load the value a switch branches on.
    SwitchTarget {
        /// The pointer to the switched-on value.
        target_ptr: InstId,
    },
    /// Extract an enum value's tag.
    EnumTag {
        /// The enum value.
        value: InstId,
    },
    /// The `@staticEval` builtin.
    StaticEval {
        /// The evaluated expression.
        value: InstId,
    },
    /// The `@import` builtin.
    Import {
        /// The instruction producing the import path.
        name: InstId,
    },
    /// An array or slice `.len` access.
    ArrayLen {
        /// The instruction producing the array value.
        array: InstId,
    },
    /// Take a reference to a value, materializing it in memory if needed.
    Ref {
        /// The referenced value.
        value: InstId,
    },
}

/// One operation node in the IR graph.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// A run-unique id, assigned when the instruction is appended to an
    /// [`Executable`] and never reused. This is the number behind `#id`
    /// tokens in the dump.
    pub debug_id: usize,

    /// The resolved type, or `None` for instructions that have not been
    /// through type analysis yet.
    pub ty: Option<TypeId>,

    /// How many other instructions use this one. Only meaningful when
    /// [`Instruction::has_side_effects`] is false; side-effecting
    /// instructions are retained regardless of uses.
    pub ref_count: usize,

    /// Whether and when the instruction's value is known.
    pub state: EvalState,

    /// The operation itself.
    pub kind: InstKind,
}

impl Instruction {
    /// Whether this instruction is retained regardless of its use count.
    pub fn has_side_effects(&self) -> bool {
        match &self.kind {
            InstKind::Return { .. }
            | InstKind::DeclVar { .. }
            | InstKind::Call { .. }
            | InstKind::CondBr { .. }
            | InstKind::Br { .. }
            | InstKind::SwitchBr { .. }
            | InstKind::StorePtr { .. }
            | InstKind::Unreachable
            | InstKind::SetFnTest { .. }
            | InstKind::SetFnVisible { .. }
            | InstKind::SetDebugSafety { .. }
            | InstKind::Import { .. } => true,
            InstKind::Asm { is_volatile, .. } => *is_volatile,
            InstKind::Const
            | InstKind::BinOp { .. }
            | InstKind::UnOp { .. }
            | InstKind::Cast { .. }
            | InstKind::Phi { .. }
            | InstKind::ContainerInitList { .. }
            | InstKind::ContainerInitFields { .. }
            | InstKind::StructInit { .. }
            | InstKind::ElemPtr { .. }
            | InstKind::VarPtr { .. }
            | InstKind::LoadPtr { .. }
            | InstKind::TypeOf { .. }
            | InstKind::ToPtrType { .. }
            | InstKind::PtrTypeChild { .. }
            | InstKind::FieldPtr { .. }
            | InstKind::StructFieldPtr { .. }
            | InstKind::EnumFieldPtr { .. }
            | InstKind::ArrayType { .. }
            | InstKind::SliceType { .. }
            | InstKind::CompileVar { .. }
            | InstKind::SizeOf { .. }
            | InstKind::TestNull { .. }
            | InstKind::UnwrapMaybe { .. }
            | InstKind::Clz { .. }
            | InstKind::Ctz { .. }
            | InstKind::SwitchVar { .. }
            | InstKind::SwitchTarget { .. }
            | InstKind::EnumTag { .. }
            | InstKind::StaticEval { .. }
            | InstKind::ArrayLen { .. }
            | InstKind::Ref { .. } => false,
        }
    }

    /// Whether uses of this instruction dump its value inline.
    ///
    /// True unless the value only exists at run time; run-time
    /// instructions are always referenced by their `#id` token instead.
    pub fn renders_inline(&self) -> bool {
        !matches!(self.state, EvalState::Runtime)
    }
}

/// A basic block: a name hint for human readers plus the instructions it
/// owns, in declaration order.
#[derive(Clone, Debug)]
pub struct BasicBlock {
    /// A short name describing where the block came from, e.g. `then` or
    /// `while_body`. Not unique; the debug id disambiguates.
    pub name_hint: String,

    /// A run-unique id for this block.
    pub debug_id: usize,

    instructions: Vec<InstId>,
}

impl BasicBlock {
    /// The block's instructions, in declaration order.
    pub fn instructions(&self) -> &[InstId] {
        &self.instructions
    }
}

/// An IR graph: an ordered sequence of basic blocks, each owning an
/// ordered sequence of instructions.
///
/// Blocks and instructions live in arenas and reference each other by id,
/// so forward references (a branch to a later-declared block, a phi naming
/// its predecessors) need no special handling.
#[derive(Debug, Default)]
pub struct Executable {
    blocks: Arena<BasicBlock>,
    instructions: Arena<Instruction>,
    block_order: Vec<BlockId>,
    next_block_debug_id: usize,
    next_inst_debug_id: usize,
}

impl Executable {
    /// Create an empty executable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, empty basic block and return its id.
    pub fn add_block(&mut self, name_hint: impl Into<String>) -> BlockId {
        let debug_id = self.next_block_debug_id;
        self.next_block_debug_id += 1;
        let id = BlockId(self.blocks.alloc(BasicBlock {
            name_hint: name_hint.into(),
            debug_id,
            instructions: vec![],
        }));
        self.block_order.push(id);
        id
    }

    /// Append an instruction to the given block, assigning it the next
    /// instruction debug id.
    ///
    /// # Panics
    ///
    /// May panic or produce incorrect results if `block` is from another
    /// `Executable`'s arena.
    pub fn append(
        &mut self,
        block: BlockId,
        ty: Option<TypeId>,
        state: EvalState,
        kind: InstKind,
    ) -> InstId {
        let debug_id = self.next_inst_debug_id;
        self.next_inst_debug_id += 1;
        let id = InstId(self.instructions.alloc(Instruction {
            debug_id,
            ty,
            ref_count: 0,
            state,
            kind,
        }));
        self.blocks[block.0].instructions.push(id);
        id
    }

    /// Record how many uses `inst` has.
    ///
    /// # Panics
    ///
    /// May panic or produce incorrect results if given an `InstId` from
    /// another `Executable`'s arena.
    pub fn set_ref_count(&mut self, inst: InstId, count: usize) {
        self.instructions[inst.0].ref_count = count;
    }

    /// Get the instruction with the given id.
    ///
    /// # Panics
    ///
    /// May panic or produce incorrect results if given an `InstId` from
    /// another `Executable`'s arena.
    pub fn inst(&self, id: InstId) -> &Instruction {
        &self.instructions[id.0]
    }

    /// Get the basic block with the given id.
    ///
    /// # Panics
    ///
    /// May panic or produce incorrect results if given a `BlockId` from
    /// another `Executable`'s arena.
    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.0]
    }

    /// The basic blocks, in declaration order.
    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> + '_ {
        self.block_order.iter().map(move |id| &self.blocks[id.0])
    }
}
