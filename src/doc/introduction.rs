/*!
# Introduction

`bc` turns BASIC source text into a `.prg` file that a Commodore 64 can
`LOAD` and `RUN`. It can also turn a `.prg` file back into text.

Write your program in any text editor.

```text
10 print "hello world"
20 goto 10
```

Then compile it.

```text
bc hello.bas
```

This writes `hello.prg` next to the source. Choose another name with
`-o`. Several source files may be given; they are compiled in order into
one program.

## Line numbers are optional

A line without a number gets one more than the line before it. Lines
that are branched to can be given a name instead.

```text
start:
print "again? ";
get k$:if k$="" then 10
if k$="y" then start
```

A label names the next line that holds a statement. A label at the very
end of the program names an empty `REM` line added after everything else.
Labels never reach the `.prg` file; the line number is written in their
place.

## Listing a program

```text
bc -u hello.prg
```

The listing goes to standard output unless `-o` is given. Add `-p` for
spacing around keywords and separators.

## Crunching

`-c` removes spaces and comments and renumbers the program from 1. Branch
targets are renumbered to match.

## Debug map

`-m file` writes one line per compiled line with its start and end
address, line number, source line index and source length. A line holding
the file name comes before the lines of each source file.
*/
