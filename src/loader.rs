// font-magician/src/loader.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Writes face rules out as a script that loads them at runtime instead of blocking rendering.

use std::fs;
use std::io;
use std::path::Path;

use crate::face_rule::FaceRecord;

/// Receives the face rules extracted from a stylesheet in asynchronous mode.
pub trait LoaderEmitter: Send + Sync {
    fn emit(&self, records: &[FaceRecord], path: &Path) -> io::Result<()>;
}

/// Emits a JavaScript file that registers each face through the CSS Font Loading API.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptEmitter;

impl ScriptEmitter {
    /// Renders the script for `records`.
    pub fn render(&self, records: &[FaceRecord]) -> io::Result<String> {
        let fonts = serde_json::to_string(records)?;
        Ok(format!(
            "(function(fonts){{\
if(!('fonts' in document)||typeof FontFace!=='function'){{return;}}\
fonts.forEach(function(font){{\
var face=new FontFace(font.family,font.src,{{weight:font.weight,style:font.style}});\
face.load().then(function(loaded){{document.fonts.add(loaded);}},function(){{}});\
}});\
}})({});\n",
            fonts
        ))
    }
}

impl LoaderEmitter for ScriptEmitter {
    fn emit(&self, records: &[FaceRecord], path: &Path) -> io::Result<()> {
        let script = self.render(records)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, script)
    }
}
