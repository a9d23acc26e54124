mod cmdline;
mod drawable;
mod path_api;
mod svg_document;
