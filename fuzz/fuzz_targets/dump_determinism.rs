#![no_main]

use libfuzzer_sys::fuzz_target;
use luma_ir::ir::{
    BinOpKind, ConstValue, EvalState, Executable, InstId, InstKind, IntValue, TypeKind, TypeTable,
};

// Decode the input as a little graph-construction program: each opcode
// byte appends a block or an instruction, with operands drawn from what
// already exists. Every input decodes to a well-formed graph, so dumping
// must never panic and must be byte-stable.
fuzz_target!(|data: &[u8]| {
    let _ = env_logger::try_init();

    let mut types = TypeTable::new();
    let i32_ty = types.intern("i32", TypeKind::Int);
    let bool_ty = types.intern("bool", TypeKind::Bool);
    let ptr_ty = types.intern("&i32", TypeKind::Pointer { pointee: i32_ty });
    let arr_ty = types.intern(
        "[4]i32",
        TypeKind::Array {
            elem: i32_ty,
            len: 4,
        },
    );

    let mut exec = Executable::new();
    let mut blocks = vec![exec.add_block("entry")];
    let mut insts: Vec<InstId> = vec![];

    let mut bytes = data.iter().copied();
    for _ in 0..256 {
        let op = match bytes.next() {
            Some(b) => b,
            None => break,
        };
        let sel = bytes.next().unwrap_or(0) as usize;
        let block = blocks[sel % blocks.len()];

        match op % 9 {
            0 => {
                let x = bytes.next().unwrap_or(0) as i64 - 128;
                insts.push(exec.append(
                    block,
                    Some(i32_ty),
                    EvalState::Known(ConstValue::Int(IntValue::from(x))),
                    InstKind::Const,
                ));
            }
            1 => {
                blocks.push(exec.add_block("b"));
            }
            2 => {
                if let (Some(lhs), Some(rhs)) = (
                    pick(&insts, bytes.next()),
                    pick(&insts, bytes.next()),
                ) {
                    let op = match bytes.next().unwrap_or(0) % 4 {
                        0 => BinOpKind::Add,
                        1 => BinOpKind::SubWrap,
                        2 => BinOpKind::CmpEq,
                        _ => BinOpKind::ShiftLeft,
                    };
                    insts.push(exec.append(
                        block,
                        Some(i32_ty),
                        EvalState::Runtime,
                        InstKind::BinOp { op, lhs, rhs },
                    ));
                }
            }
            3 => {
                insts.push(exec.append(
                    block,
                    Some(ptr_ty),
                    EvalState::Runtime,
                    InstKind::VarPtr {
                        name: format!("v{}", sel % 7),
                    },
                ));
            }
            4 => {
                let dest = blocks[bytes.next().unwrap_or(0) as usize % blocks.len()];
                exec.append(
                    block,
                    None,
                    EvalState::Runtime,
                    InstKind::Br {
                        dest,
                        is_inline: op & 0x10 != 0,
                    },
                );
            }
            5 => {
                if let Some(condition) = pick(&insts, bytes.next()) {
                    let then_block = blocks[bytes.next().unwrap_or(0) as usize % blocks.len()];
                    let else_block = blocks[bytes.next().unwrap_or(0) as usize % blocks.len()];
                    exec.append(
                        block,
                        Some(bool_ty),
                        EvalState::Runtime,
                        InstKind::CondBr {
                            condition,
                            then_block,
                            else_block,
                            is_inline: op & 0x10 != 0,
                        },
                    );
                }
            }
            6 => {
                if let Some(value) = pick(&insts, bytes.next()) {
                    let incoming = blocks
                        .iter()
                        .take(1 + sel % 3)
                        .map(|&b| (b, value))
                        .collect::<Vec<_>>();
                    insts.push(exec.append(
                        block,
                        Some(i32_ty),
                        EvalState::Runtime,
                        InstKind::Phi { incoming },
                    ));
                }
            }
            7 => {
                let elems = (0..4)
                    .map(|i| match (sel >> i) & 1 {
                        0 => EvalState::Zeroed,
                        _ => EvalState::Known(ConstValue::Int(IntValue::from(i as u64))),
                    })
                    .collect();
                insts.push(exec.append(
                    block,
                    Some(arr_ty),
                    EvalState::Known(ConstValue::Array(elems)),
                    InstKind::Const,
                ));
            }
            _ => {
                if let Some(value) = pick(&insts, bytes.next()) {
                    exec.append(
                        block,
                        Some(i32_ty),
                        EvalState::Runtime,
                        InstKind::Return { value },
                    );
                }
            }
        }

        if let Some(&id) = insts.last() {
            exec.set_ref_count(id, sel % 5);
        }
    }

    let first = exec.dump(&types, 2).to_string();

    log::debug!("dump = \"\"\"\n{}\n\"\"\"", first);

    let second = exec.dump(&types, 2).to_string();
    assert_eq!(first, second, "dumping the same graph twice diverged");
});

fn pick(insts: &[InstId], b: Option<u8>) -> Option<InstId> {
    if insts.is_empty() {
        None
    } else {
        Some(insts[b.unwrap_or(0) as usize % insts.len()])
    }
}
