//! demos/host_refs — a host passing its own objects through an engine call.
//!
//! Simulates the invocation layer around an engine function
//! `(externref, i32) -> (externref, i32)` that echoes its arguments:
//!   1. Registers a host object and encodes the arguments.
//!   2. "Calls" the engine, which hands back the same cells.
//!   3. Decodes the results and resolves the reference.
//!   4. Releases the reference and shows that it no longer resolves.

use std::sync::Mutex;

use vmbridge::{Bridge, Val, ValType};

struct Counter {
    hits: Mutex<u32>,
}

fn main() {
    let bridge = Bridge::new();
    let counter = bridge.new_extern_ref(Counter { hits: Mutex::new(0) });
    println!("registered counter as handle {}", counter.handle());

    let signature = [ValType::ExternRef, ValType::I32];
    let mut current = counter;
    for round in 0..3 {
        let args = bridge
            .encode_all(&[Val::ExternRef(current), Val::I32(round)])
            .expect("encode failed");

        // The engine echoes its arguments back.
        let mut results = bridge
            .decode_all(&args, &signature)
            .expect("decode failed")
            .into_iter();
        current = results
            .next()
            .and_then(Val::into_extern_ref)
            .expect("externref result");
        let echoed = results.next().expect("i32 result");

        let obj = bridge
            .registry()
            .get_ref_as::<Counter>(&current)
            .expect("counter still registered");
        let mut hits = obj.hits.lock().expect("counter lock");
        *hits += 1;
        println!("round {round}: {echoed:?} -> hits = {hits}");
    }

    let released = bridge.release(current);
    println!("released: valid = {}", released.is_valid());
    match bridge.encode(&Val::ExternRef(released)) {
        Ok(_) => println!("unexpectedly encoded a released reference"),
        Err(e) => println!("encode rejected: {e}"),
    }
}
