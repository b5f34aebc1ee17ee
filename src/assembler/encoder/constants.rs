/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

/// ARE bits occupying the low two bits of every machine word (§4.5/§4.6).
pub const ARE_ABSOLUTE: u16 = 0b00;
pub const ARE_EXTERNAL: u16 = 0b01;
pub const ARE_RELOCATABLE: u16 = 0b10;

/// Absolute address of the first instruction word (glossary: BASE).
pub const BASE_ADDRESS: u32 = 100;

/// Total addressable machine words.
pub const MEMORY_SIZE: u32 = 256;

/// Mask applied to every machine word on construction (§9 bit-packing note).
pub const WORD_MASK: u16 = 0x3FF;
