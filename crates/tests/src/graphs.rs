//! Construction of the IR graphs behind the snapshot corpus.

use luma_ir::ir::{
    BinOpKind, Callee, ConstValue, EvalState, Executable, InstKind, IntValue, SwitchCase,
    TypeKind, TypeTable,
};

/// Build the graph whose expected dump lives in `dumps/<name>.ir`.
///
/// # Panics
///
/// Panics on an unknown name; every corpus file needs a builder here.
pub fn build(name: &str) -> (Executable, TypeTable) {
    match name {
        "return_const" => return_const(),
        "phi_runtime" => phi_runtime(),
        "array_zeroes" => array_zeroes(),
        "ptr_bool" => ptr_bool(),
        "inline_condbr" => inline_condbr(),
        "bound_fn" => bound_fn(),
        "var_decl_call" => var_decl_call(),
        "switch_asm" => switch_asm(),
        _ => panic!("no graph builder for corpus file `{}`", name),
    }
}

fn known_int(x: i64) -> EvalState {
    EvalState::Known(ConstValue::Int(IntValue::from(x)))
}

/// A single block returning a statically known `i32` 42.
fn return_const() -> (Executable, TypeTable) {
    let mut types = TypeTable::new();
    let i32_ty = types.intern("i32", TypeKind::Int);

    let mut exec = Executable::new();
    let entry = exec.add_block("entry");
    let forty_two = exec.append(entry, Some(i32_ty), known_int(42), InstKind::Const);
    exec.set_ref_count(forty_two, 1);
    exec.append(
        entry,
        Some(i32_ty),
        EvalState::Runtime,
        InstKind::Return { value: forty_two },
    );
    (exec, types)
}

/// A phi joining two run-time values; both incoming positions must dump as
/// `#id` references, and the block tokens resolve by id.
fn phi_runtime() -> (Executable, TypeTable) {
    let types = TypeTable::new();

    let mut exec = Executable::new();
    let then_block = exec.add_block("then");
    let else_block = exec.add_block("else");
    let merge = exec.add_block("merge");

    let a = exec.append(
        then_block,
        None,
        EvalState::Runtime,
        InstKind::VarPtr { name: "a".into() },
    );
    exec.set_ref_count(a, 1);
    exec.append(
        then_block,
        None,
        EvalState::Runtime,
        InstKind::Br {
            dest: merge,
            is_inline: false,
        },
    );

    let b = exec.append(
        else_block,
        None,
        EvalState::Runtime,
        InstKind::VarPtr { name: "b".into() },
    );
    exec.set_ref_count(b, 1);
    exec.append(
        else_block,
        None,
        EvalState::Runtime,
        InstKind::Br {
            dest: merge,
            is_inline: false,
        },
    );

    exec.append(
        merge,
        None,
        EvalState::Runtime,
        InstKind::Phi {
            incoming: vec![(then_block, a), (else_block, b)],
        },
    );
    (exec, types)
}

/// Zero-filled elements keep the `zeroes` spelling; known zeros print as
/// `0`. The two arrays are distinguishable in the dump.
fn array_zeroes() -> (Executable, TypeTable) {
    let mut types = TypeTable::new();
    let u8_ty = types.intern("u8", TypeKind::Int);
    let arr_ty = types.intern(
        "[3]u8",
        TypeKind::Array {
            elem: u8_ty,
            len: 3,
        },
    );

    let mut exec = Executable::new();
    let entry = exec.add_block("entry");

    let zeroed = exec.append(
        entry,
        Some(arr_ty),
        EvalState::Known(ConstValue::Array(vec![
            EvalState::Zeroed,
            EvalState::Zeroed,
            EvalState::Zeroed,
        ])),
        InstKind::Const,
    );
    exec.set_ref_count(zeroed, 1);

    let literal = exec.append(
        entry,
        Some(arr_ty),
        EvalState::Known(ConstValue::Array(vec![
            known_int(0),
            known_int(0),
            known_int(0),
        ])),
        InstKind::Const,
    );
    exec.set_ref_count(literal, 1);
    (exec, types)
}

/// A pointer constant renders `&` followed by its pointee.
fn ptr_bool() -> (Executable, TypeTable) {
    let mut types = TypeTable::new();
    let bool_ty = types.intern("bool", TypeKind::Bool);
    let ptr_ty = types.intern("&bool", TypeKind::Pointer { pointee: bool_ty });

    let mut exec = Executable::new();
    let entry = exec.add_block("entry");
    exec.append(
        entry,
        Some(ptr_ty),
        EvalState::Known(ConstValue::Ptr(Box::new(EvalState::Known(
            ConstValue::Bool(true),
        )))),
        InstKind::Const,
    );
    (exec, types)
}

/// An `inline` conditional branch.
fn inline_condbr() -> (Executable, TypeTable) {
    let mut types = TypeTable::new();
    let bool_ty = types.intern("bool", TypeKind::Bool);

    let mut exec = Executable::new();
    let entry = exec.add_block("entry");
    let then_block = exec.add_block("then");
    let else_block = exec.add_block("else");

    let cond = exec.append(
        entry,
        Some(bool_ty),
        EvalState::Known(ConstValue::Bool(true)),
        InstKind::Const,
    );
    exec.set_ref_count(cond, 1);
    exec.append(
        entry,
        None,
        EvalState::Runtime,
        InstKind::CondBr {
            condition: cond,
            then_block,
            else_block,
            is_inline: true,
        },
    );
    exec.append(then_block, None, EvalState::Runtime, InstKind::Unreachable);
    exec.append(else_block, None, EvalState::Runtime, InstKind::Unreachable);
    (exec, types)
}

/// A bound-function constant whose receiver is a run-time instruction; the
/// receiver dumps as a reference, not inline.
fn bound_fn() -> (Executable, TypeTable) {
    let mut types = TypeTable::new();
    let bound_ty = types.intern("(bound fn)", TypeKind::BoundFn);

    let mut exec = Executable::new();
    let entry = exec.add_block("entry");

    let receiver = exec.append(
        entry,
        None,
        EvalState::Runtime,
        InstKind::VarPtr { name: "p".into() },
    );
    exec.set_ref_count(receiver, 1);
    exec.append(
        entry,
        Some(bound_ty),
        EvalState::Known(ConstValue::BoundFn {
            symbol: "foo".into(),
            first_arg: receiver,
        }),
        InstKind::Const,
    );
    (exec, types)
}

/// Variable declaration, pointer traffic, arithmetic, a call, and a cast.
fn var_decl_call() -> (Executable, TypeTable) {
    let mut types = TypeTable::new();
    let type_ty = types.intern("type", TypeKind::Meta);
    let i32_ty = types.intern("i32", TypeKind::Int);
    let i32_ptr_ty = types.intern("&i32", TypeKind::Pointer { pointee: i32_ty });
    let void_ty = types.intern("void", TypeKind::Void);

    let mut exec = Executable::new();
    let entry = exec.add_block("entry");

    let i32_value = exec.append(
        entry,
        Some(type_ty),
        EvalState::Known(ConstValue::Type(i32_ty)),
        InstKind::Const,
    );
    exec.set_ref_count(i32_value, 1);

    let ten = exec.append(entry, Some(i32_ty), known_int(10), InstKind::Const);
    exec.set_ref_count(ten, 2);

    exec.append(
        entry,
        None,
        EvalState::Runtime,
        InstKind::DeclVar {
            name: "x".into(),
            is_inline: false,
            is_const: true,
            var_type: Some(i32_value),
            init: ten,
        },
    );

    let x_ptr = exec.append(
        entry,
        Some(i32_ptr_ty),
        EvalState::Runtime,
        InstKind::VarPtr { name: "x".into() },
    );
    exec.set_ref_count(x_ptr, 2);

    let x = exec.append(
        entry,
        Some(i32_ty),
        EvalState::Runtime,
        InstKind::LoadPtr { ptr: x_ptr },
    );
    exec.set_ref_count(x, 1);

    let sum = exec.append(
        entry,
        Some(i32_ty),
        EvalState::Runtime,
        InstKind::BinOp {
            op: BinOpKind::Add,
            lhs: x,
            rhs: ten,
        },
    );
    exec.set_ref_count(sum, 3);

    exec.append(
        entry,
        None,
        EvalState::Runtime,
        InstKind::StorePtr {
            ptr: x_ptr,
            value: sum,
        },
    );

    exec.append(
        entry,
        Some(void_ty),
        EvalState::Runtime,
        InstKind::Call {
            callee: Callee::Direct("print".into()),
            args: vec![sum],
        },
    );

    exec.append(
        entry,
        Some(i32_ty),
        EvalState::Runtime,
        InstKind::Cast {
            value: sum,
            dest_type: i32_ty,
        },
    );

    exec.append(entry, None, EvalState::Runtime, InstKind::Unreachable);
    (exec, types)
}

/// A switch over a run-time target, a volatile asm expression, and optional
/// constants in both the present and absent forms.
fn switch_asm() -> (Executable, TypeTable) {
    let mut types = TypeTable::new();
    let i32_ty = types.intern("i32", TypeKind::Int);
    let maybe_ty = types.intern("?i32", TypeKind::Maybe { child: i32_ty });
    let void_ty = types.intern("void", TypeKind::Void);

    let mut exec = Executable::new();
    let entry = exec.add_block("entry");
    let case1 = exec.add_block("case1");
    let case2 = exec.add_block("case2");
    let other = exec.add_block("other");

    let t_ptr = exec.append(
        entry,
        None,
        EvalState::Runtime,
        InstKind::VarPtr { name: "t".into() },
    );
    exec.set_ref_count(t_ptr, 1);

    let target = exec.append(
        entry,
        Some(i32_ty),
        EvalState::Runtime,
        InstKind::SwitchTarget { target_ptr: t_ptr },
    );
    exec.set_ref_count(target, 1);

    let one = exec.append(entry, Some(i32_ty), known_int(1), InstKind::Const);
    exec.set_ref_count(one, 1);
    let two = exec.append(entry, Some(i32_ty), known_int(2), InstKind::Const);
    exec.set_ref_count(two, 1);

    exec.append(
        entry,
        None,
        EvalState::Runtime,
        InstKind::SwitchBr {
            target,
            cases: vec![
                SwitchCase {
                    value: one,
                    block: case1,
                },
                SwitchCase {
                    value: two,
                    block: case2,
                },
            ],
            else_block: other,
            is_inline: false,
        },
    );

    exec.append(
        case1,
        Some(void_ty),
        EvalState::Runtime,
        InstKind::Asm {
            template: "nop".into(),
            outputs: vec![],
            inputs: vec![],
            clobbers: vec!["memory".into()],
            is_volatile: true,
        },
    );
    exec.append(
        case1,
        None,
        EvalState::Runtime,
        InstKind::Br {
            dest: other,
            is_inline: false,
        },
    );

    let some = exec.append(
        case2,
        Some(maybe_ty),
        EvalState::Known(ConstValue::Maybe(Some(Box::new(known_int(5))))),
        InstKind::Const,
    );
    exec.set_ref_count(some, 1);
    exec.append(
        case2,
        Some(maybe_ty),
        EvalState::Known(ConstValue::Maybe(None)),
        InstKind::Const,
    );
    exec.append(
        case2,
        None,
        EvalState::Runtime,
        InstKind::Br {
            dest: other,
            is_inline: false,
        },
    );

    exec.append(other, None, EvalState::Runtime, InstKind::Unreachable);
    (exec, types)
}
