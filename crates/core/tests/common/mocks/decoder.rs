use armstep_core::common::DecodeError;
use armstep_core::isa::{Decoder, Instruction};
use mockall::mock;

mock! {
    pub ScriptedDecoder {}
    impl Decoder for ScriptedDecoder {
        fn decode(&self, word: u32) -> Result<Instruction, DecodeError>;
    }
}
