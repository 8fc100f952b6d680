use ls8::opcode::*;
use ls8::{loader, run, CpuConfig, CpuError, Status, SystemState};

fn run_bytes(program: &[u8]) -> (SystemState, Result<Status, CpuError>, String) {
    let mut sys = SystemState::with_program(&CpuConfig::default(), program).unwrap();
    let mut out = Vec::new();
    let status = run(&mut sys, &mut out);
    (sys, status, String::from_utf8(out).unwrap())
}

fn run_source(source: &str) -> String {
    let program = loader::parse_program(source).unwrap();
    let (_, status, out) = run_bytes(&program);
    assert_eq!(status.unwrap(), Status::Halted);
    out
}

#[test]
fn default_program_prints_8() {
    let (_, status, out) = run_bytes(&loader::DEFAULT_PROGRAM);
    assert_eq!(status.unwrap(), Status::Halted);
    assert_eq!(out, "8\n");
}

#[test]
fn print8_file_matches_default_program() {
    let program = loader::parse_program(include_str!("../programs/print8.ls8")).unwrap();
    assert_eq!(program, loader::DEFAULT_PROGRAM.to_vec());
}

#[test]
fn mult_prints_30() {
    assert_eq!(run_source(include_str!("../programs/mult.ls8")), "30\n");
}

#[test]
fn stack_pops_in_reverse_order() {
    assert_eq!(run_source(include_str!("../programs/stack.ls8")), "3\n2\n1\n");
}

#[test]
fn call_resumes_after_call_site() {
    assert_eq!(run_source(include_str!("../programs/call.ls8")), "20\n30\n");
}

#[test]
fn compare_and_branch() {
    assert_eq!(run_source(include_str!("../programs/sctest.ls8")), "1\n2\n");
}

#[test]
fn load_file_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/programs/mult.ls8");
    let program = loader::load_file(path).unwrap();
    let (_, status, out) = run_bytes(&program);
    assert_eq!(status.unwrap(), Status::Halted);
    assert_eq!(out, "30\n");
}

/// Runs `CMP R0, R1` with the given values, then the jump under test.
/// R3 points at a `PRN R2` that prints 1; falling through prints 0.
fn branch_taken(jump: u8, a: u8, b: u8) -> bool {
    let program = [
        LDI, 0, a, // 0
        LDI, 1, b, // 3
        LDI, 3, 22, // 6
        CMP, 0, 1, // 9
        jump, 3, // 12
        LDI, 2, 0, // 14
        PRN, 2, // 17
        HLT, // 19
        NOP, NOP, // 20
        LDI, 2, 1, // 22
        PRN, 2, // 25
        HLT, // 27
    ];
    let (_, status, out) = run_bytes(&program);
    assert_eq!(status.unwrap(), Status::Halted);
    match out.as_str() {
        "1\n" => true,
        "0\n" => false,
        other => panic!("unexpected output {other:?}"),
    }
}

#[test]
fn conditional_jumps_follow_comparison() {
    // (a, b) for equal, less-than, greater-than
    let outcomes = [(7, 7), (3, 7), (9, 7)];
    let table = [
        (JEQ, [true, false, false]),
        (JNE, [false, true, true]),
        (JLT, [false, true, false]),
        (JGT, [false, false, true]),
        (JLE, [true, true, false]),
        (JGE, [true, false, true]),
        (JMP, [true, true, true]),
    ];
    for (jump, expected) in table {
        for ((a, b), want) in outcomes.iter().zip(expected) {
            assert_eq!(
                branch_taken(jump, *a, *b),
                want,
                "{} with a={a} b={b}",
                decode(jump).unwrap().mnemonic
            );
        }
    }
}

#[test]
fn push_pop_restores_stack_pointer() {
    let (sys, status, _) = run_bytes(&[LDI, 2, 200, PUSH, 2, POP, 5, HLT]);
    status.unwrap();
    assert_eq!(sys.cpu_state.reg.get(5).unwrap(), 200);
    assert_eq!(sys.cpu_state.reg.sp(), 0xf4);
}

#[test]
fn division_by_zero_stops_the_run() {
    for op in [DIV, MOD] {
        let (sys, status, out) = run_bytes(&[LDI, 0, 12, op, 0, 1, PRN, 0, HLT]);
        assert!(matches!(status, Err(CpuError::DivisionByZero { pc: 3, .. })));
        assert!(status.unwrap_err().is_fatal());
        assert_eq!(sys.cpu_state.reg.get(0).unwrap(), 12);
        assert_eq!(out, "");
    }
}

#[test]
fn alu_ops_through_the_engine() {
    let program = [
        LDI, 0, 0b1111_0000, // 0
        LDI, 1, 2, // 3
        SHR, 0, 1, // 6  -> 0b0011_1100
        NOT, 0, // 9     -> 0b1100_0011
        INC, 0, // 11    -> 0b1100_0100
        LDI, 2, 0b0000_1111, // 13
        AND, 0, 2, // 16 -> 0b0000_0100
        DEC, 0, // 19    -> 3
        ST, 3, 0, // 21
        PRN, 3, // 24
        HLT,
    ];
    let (_, status, out) = run_bytes(&program);
    assert_eq!(status.unwrap(), Status::Halted);
    assert_eq!(out, "3\n");
}

#[test]
fn bad_register_operand_is_fatal() {
    let (_, status, _) = run_bytes(&[LDI, 8, 1, HLT]);
    assert!(matches!(status, Err(CpuError::RegisterOutOfBounds { index: 8 })));
}
